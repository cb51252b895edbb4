use shopadmin_core::{ResourceId, ResourceKind};

/// Where the host should go after a successful submit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    List(ResourceKind),
    Detail(ResourceKind, ResourceId),
}

impl Route {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Route::List(kind) | Route::Detail(kind, _) => *kind,
        }
    }

    /// `/products` or `/products/7`.
    pub fn path(&self) -> String {
        match self {
            Route::List(kind) => format!("/{}", kind.path()),
            Route::Detail(kind, id) => format!("/{}/{id}", kind.path()),
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}
