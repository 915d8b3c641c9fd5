pub mod local;
pub mod remote;

pub use local::{load_local, FileReader, FsFileReader};
pub use remote::load_remote;

use crate::models::ResourcesDictionary;

/// 本地与远端资源。每次读取整体重建。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStore {
    local: ResourcesDictionary,
    remote: ResourcesDictionary,
}

impl ResourceStore {
    pub fn local(&self) -> &ResourcesDictionary {
        &self.local
    }

    pub fn remote(&self) -> &ResourcesDictionary {
        &self.remote
    }

    pub(crate) fn replace_local(&mut self, local: ResourcesDictionary) {
        self.local = local;
    }

    pub(crate) fn replace_remote(&mut self, remote: ResourcesDictionary) {
        self.remote = remote;
    }
}
