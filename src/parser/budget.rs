//! Per-attempt node budget.
//!
//! Every finished node is charged against [`ParseOptions::max_nodes`]; the
//! attempt fails once the budget is spent.
//!
//! [`ParseOptions::max_nodes`]: crate::parser::ParseOptions::max_nodes

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("syntax tree exceeds {limit} nodes")]
pub struct BudgetExhausted {
    pub limit: usize,
}

/// Countdown of nodes one parse attempt may still finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBudget {
    limit: usize,
    spent: usize,
}

impl NodeBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, spent: 0 }
    }

    /// Charges one node.
    pub fn charge(&mut self) -> Result<(), BudgetExhausted> {
        if self.spent == self.limit {
            return Err(BudgetExhausted { limit: self.limit });
        }
        self.spent += 1;
        Ok(())
    }

    pub const fn spent(&self) -> usize {
        self.spent
    }

    pub const fn remaining(&self) -> usize {
        self.limit - self.spent
    }
}
