use std::collections::HashSet;

/// Discord user ids allowed to run privileged commands.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    ids: HashSet<u64>,
}

impl AdminList {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
