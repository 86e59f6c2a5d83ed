use crate::OperationCost;

/// A value paired with the hashing work spent producing it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// The produced value.
    pub value: T,
    /// Hashing work spent on `value`.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Fold the cost into `acc` and return the value.
    pub fn unwrap_add_cost(self, acc: &mut OperationCost) -> T {
        *acc += self.cost;
        self.value
    }

    /// Discard the cost and return the value.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Transform the value; the cost is carried over unchanged.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        CostContext {
            value: f(self.value),
            cost: self.cost,
        }
    }

    /// Chain a costed step, summing both costs.
    pub fn flat_map<B>(self, f: impl FnOnce(T) -> CostContext<B>) -> CostContext<B> {
        let next = f(self.value);
        CostContext {
            value: next.value,
            cost: self.cost + next.cost,
        }
    }

    /// Charge work done before this context was created.
    pub fn add_cost(mut self, earlier: OperationCost) -> Self {
        self.cost += earlier;
        self
    }
}

/// A costed `Result`. The cost is kept on both `Ok` and `Err`.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

impl<T, E> CostResult<T, E> {
    /// Transform an `Ok` value, leaving the cost untouched.
    pub fn map_ok<B>(self, f: impl FnOnce(T) -> B) -> CostResult<B, E> {
        self.map(|result| result.map(f))
    }

    /// Chain a fallible costed step. An `Err` short-circuits and `f` is not
    /// charged.
    pub fn flat_map_ok<B>(self, f: impl FnOnce(T) -> CostResult<B, E>) -> CostResult<B, E> {
        let CostContext { value, mut cost } = self;
        let value = value.and_then(|ok| f(ok).unwrap_add_cost(&mut cost));
        CostContext { value, cost }
    }

    /// The accumulated cost, or the error if the operation failed.
    pub fn cost_as_result(self) -> Result<OperationCost, E> {
        let cost = self.cost;
        self.value.map(|_| cost)
    }
}

/// Attaches an [`OperationCost`] to any value.
pub trait CostsExt: Sized {
    /// Pair `self` with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self> {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}
