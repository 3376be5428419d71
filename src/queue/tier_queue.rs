//! FIFO line for a single tier.

use crate::error::{DispatchError, Result};
use crate::model::{Customer, CustomerId, Tier};
use std::collections::VecDeque;
use tracing::error;

/// FIFO of customers belonging to one [`Tier`], plus an append-only
/// history of the customers it has handed out.
///
/// Every customer in the FIFO has the queue's tier.
#[derive(Debug, Clone)]
pub struct TierQueue {
    tier: Tier,
    waiting: VecDeque<Customer>,
    history: Vec<Customer>,
}

impl TierQueue {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            waiting: VecDeque::new(),
            history: Vec::new(),
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Appends a customer to the back. O(1).
    ///
    /// Fails with [`DispatchError::TierMismatch`] if the customer belongs
    /// to another tier; the customer is not queued in that case.
    pub fn enqueue(&mut self, customer: Customer) -> Result<()> {
        self.check_tier(&customer)?;
        self.waiting.push_back(customer);
        Ok(())
    }

    /// Removes the front customer and records it in the history. O(1).
    ///
    /// Returns `None` when nobody is waiting.
    pub fn dequeue(&mut self) -> Option<Customer> {
        let customer = self.waiting.pop_front()?;
        self.history.push(customer.clone());
        Some(customer)
    }

    /// The front customer, without removing it.
    pub fn peek(&self) -> Option<&Customer> {
        self.waiting.front()
    }

    /// Replaces the FIFO content with `customers`, keeping their order.
    ///
    /// All customers are checked before anything is discarded, so a tier
    /// mismatch leaves the queue untouched.
    pub fn replace_all(&mut self, customers: Vec<Customer>) -> Result<()> {
        for customer in &customers {
            self.check_tier(customer)?;
        }
        self.waiting = VecDeque::from(customers);
        Ok(())
    }

    /// Removes a waiting customer by id, wherever it sits in the line. O(n).
    pub fn remove(&mut self, id: CustomerId) -> Option<Customer> {
        let pos = self.waiting.iter().position(|c| c.id == id)?;
        self.waiting.remove(pos)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Copies the waiting customers, front first. O(n); the queue is unchanged.
    pub fn drain_to_list(&self) -> Vec<Customer> {
        self.waiting.iter().cloned().collect()
    }

    /// Customers handed out by [`dequeue`](Self::dequeue), oldest first.
    pub fn history(&self) -> &[Customer] {
        &self.history
    }

    /// Discards all waiting customers. The history is kept.
    pub fn clear(&mut self) {
        self.waiting.clear();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn check_tier(&self, customer: &Customer) -> Result<()> {
        if customer.tier != self.tier {
            error!(
                customer = customer.id,
                expected = %self.tier,
                actual = %customer.tier,
                "customer routed to the wrong tier queue"
            );
            return Err(DispatchError::TierMismatch {
                expected: self.tier,
                actual: customer.tier,
            });
        }
        Ok(())
    }
}
