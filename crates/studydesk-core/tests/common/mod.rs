//! Shared helpers for studydesk-core integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use studydesk_core::{DatabaseError, KvStore, MemoryStore};

/// A store handle that tests can keep reading after handing a clone to a desk.
#[derive(Clone, Default)]
pub struct SharedStore(Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).ok().flatten()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.0.borrow_mut().set(key, value).unwrap();
    }
}

impl KvStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.0.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), DatabaseError> {
        self.0.borrow_mut().remove(key)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
