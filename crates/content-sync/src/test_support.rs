use std::collections::HashMap;
use std::sync::Mutex;

use crate::client::{ClientError, CmsClient, ElementValue, ItemRef};

/// In-memory CMS double for orchestrator tests. Stores created items,
/// records every remote call, and lets individual operations be primed
/// to fail.
#[derive(Default)]
pub struct InMemoryCms {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    items: Vec<ItemRef>,
    created: Vec<ItemRef>,
    find_calls: Vec<String>,
    upserts: Vec<(String, String, Vec<ElementValue>)>,
    review_moves: Vec<(String, String, String)>,
    published: Vec<(String, String)>,
    review_step: Option<String>,
    lookup_failures: HashMap<String, String>,
    create_failures: HashMap<String, String>,
    upsert_failures: HashMap<String, String>,
    publish_failures: HashMap<String, String>,
    next_id: u32,
}

impl InMemoryCms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an item, as if a previous run had created it.
    pub fn seed_item(&self, name: &str, codename: &str) -> ItemRef {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let item = ItemRef {
            id: format!("item-{}", state.next_id),
            name: name.to_owned(),
            codename: codename.to_owned(),
        };
        state.items.push(item.clone());
        item
    }

    /// Configure the id returned by `review_step_id`. Without one, the
    /// lookup fails the way a project without a review step would.
    pub fn set_review_step(&self, step_id: &str) {
        self.state.lock().unwrap().review_step = Some(step_id.to_owned());
    }

    /// Prime `find_item` for `codename` to fail with a transport error.
    pub fn fail_lookup(&self, codename: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .lookup_failures
            .insert(codename.to_owned(), message.to_owned());
    }

    /// Prime `create_item` for `codename` to be rejected with `message`.
    pub fn fail_create(&self, codename: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .create_failures
            .insert(codename.to_owned(), message.to_owned());
    }

    /// Prime `upsert_variant` for `language_id` to be rejected.
    pub fn fail_upsert(&self, language_id: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .upsert_failures
            .insert(language_id.to_owned(), message.to_owned());
    }

    /// Prime `publish_variant` for `language_id` to be rejected.
    pub fn fail_publish(&self, language_id: &str, message: &str) {
        self.state
            .lock()
            .unwrap()
            .publish_failures
            .insert(language_id.to_owned(), message.to_owned());
    }

    pub fn created(&self) -> Vec<ItemRef> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn find_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().find_calls.clone()
    }

    pub fn upserts(&self) -> Vec<(String, String, Vec<ElementValue>)> {
        self.state.lock().unwrap().upserts.clone()
    }

    pub fn review_moves(&self) -> Vec<(String, String, String)> {
        self.state.lock().unwrap().review_moves.clone()
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().published.clone()
    }
}

#[async_trait::async_trait]
impl CmsClient for InMemoryCms {
    async fn find_item(&self, codename: &str) -> Result<Option<ItemRef>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.find_calls.push(codename.to_owned());

        if let Some(message) = state.lookup_failures.get(codename) {
            return Err(ClientError::Network(message.clone()));
        }

        Ok(state
            .items
            .iter()
            .find(|item| item.codename == codename)
            .cloned())
    }

    async fn create_item(
        &self,
        name: &str,
        codename: &str,
        _content_type: &str,
    ) -> Result<ItemRef, ClientError> {
        let mut state = self.state.lock().unwrap();

        if let Some(message) = state.create_failures.get(codename) {
            return Err(ClientError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }

        state.next_id += 1;
        let item = ItemRef {
            id: format!("item-{}", state.next_id),
            name: name.to_owned(),
            codename: codename.to_owned(),
        };
        state.items.push(item.clone());
        state.created.push(item.clone());
        Ok(item)
    }

    async fn upsert_variant(
        &self,
        item_id: &str,
        language_id: &str,
        elements: &[ElementValue],
    ) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();

        if let Some(message) = state.upsert_failures.get(language_id) {
            return Err(ClientError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }

        state
            .upserts
            .push((item_id.to_owned(), language_id.to_owned(), elements.to_vec()));
        Ok(())
    }

    async fn review_step_id(&self) -> Result<String, ClientError> {
        self.state
            .lock()
            .unwrap()
            .review_step
            .clone()
            .ok_or_else(|| ClientError::Workflow("no review step configured".into()))
    }

    async fn move_to_step(
        &self,
        item_id: &str,
        language_id: &str,
        step_id: &str,
    ) -> Result<(), ClientError> {
        self.state.lock().unwrap().review_moves.push((
            item_id.to_owned(),
            language_id.to_owned(),
            step_id.to_owned(),
        ));
        Ok(())
    }

    async fn publish_variant(
        &self,
        item_id: &str,
        language_id: &str,
    ) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();

        if let Some(message) = state.publish_failures.get(language_id) {
            return Err(ClientError::Rejected {
                status: 400,
                message: message.clone(),
            });
        }

        state
            .published
            .push((item_id.to_owned(), language_id.to_owned()));
        Ok(())
    }
}
