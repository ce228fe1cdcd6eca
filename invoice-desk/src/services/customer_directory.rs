//! Customer directory

use shared::error::{AppError, AppResult};
use shared::models::Customer;
use std::collections::HashMap;

/// Existing-customer resolution and persistence
pub trait CustomerDirectory {
    /// Look a customer up by identifier (national id / passport number)
    fn lookup_customer(&self, identifier: &str) -> AppResult<Option<Customer>>;

    /// Persist a new or edited customer, returning the stored record
    fn save_customer(&mut self, customer: Customer) -> AppResult<Customer>;
}

/// Directory kept in memory, keyed by identifier
#[derive(Debug, Default)]
pub struct InMemoryCustomerDirectory {
    customers: HashMap<String, Customer>,
    next_id: i64,
}

impl InMemoryCustomerDirectory {
    pub fn new() -> Self {
        Self {
            customers: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn lookup_customer(&self, identifier: &str) -> AppResult<Option<Customer>> {
        Ok(self.customers.get(identifier.trim()).cloned())
    }

    fn save_customer(&mut self, mut customer: Customer) -> AppResult<Customer> {
        let key = customer.identifier.trim().to_string();
        if key.is_empty() {
            return Err(AppError::validation("customer identifier must not be empty"));
        }
        // keep the existing id when the identifier is already known
        customer.id = match self.customers.get(&key) {
            Some(existing) => existing.id,
            None => {
                let id = self.next_id.max(1);
                self.next_id = id + 1;
                Some(id)
            }
        };
        self.customers.insert(key, customer.clone());
        Ok(customer)
    }
}
