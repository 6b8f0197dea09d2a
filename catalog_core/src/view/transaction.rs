use thiserror::Error;

use crate::data::UserId;

/// A transaction that can be executed on some type `V`, modifying it.
pub trait Transaction<V> {
    /// Executes the transaction on the given `V`, modifying it. If the
    /// transaction is successful, returns a function that can be used to
    /// roll back the transaction; when given a `V` in the exact state after
    /// this transaction executed, the rollback restores the exact state before
    /// this transaction executed. If the execution is unsuccessful, the `V`
    /// must remain unchanged.
    fn execute(&self, value: &mut V) -> Result<Rollback<V>, TransactionError>;
}

pub type Rollback<V> = Box<dyn Fn(&mut V)>;

/// Error type for executing transactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("There is no tab for user {0}.")]
    UnknownUser(UserId),
}

/// Executes all the given transactions on the given value, returning each
/// transaction paired with its rollback. If one of the transactions fails,
/// then the entire process is rolled back as if nothing happened at all. The
/// error and index of the transaction that failed is returned.
pub fn execute_all_or_roll_back<V, I, T>(
    value: &mut V,
    transactions: I,
) -> Result<Vec<(T, Rollback<V>)>, (TransactionError, usize)>
where
    I: IntoIterator<Item = T>,
    T: Transaction<V>,
{
    let mut applied: Vec<(T, Rollback<V>)> = Vec::new();
    for (i, transaction) in transactions.into_iter().enumerate() {
        match transaction.execute(value) {
            Ok(rollback) => applied.push((transaction, rollback)),
            Err(err) => {
                for (_transaction, rollback) in applied.into_iter().rev() {
                    rollback(value);
                }
                return Err((err, i));
            }
        }
    }
    Ok(applied)
}
