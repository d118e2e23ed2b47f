use serde::{Serialize, Deserialize};

/// `meta.statuscode` value the server reports on a successful call.
pub const SUCCESS_CODE: u16 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcsMeta {
    pub status: String,
    pub statuscode: u16,
    #[serde(default)]
    pub message: Option<String>,
}

impl OcsMeta {
    pub fn is_ok(&self) -> bool {
        self.statuscode == SUCCESS_CODE
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Layer<T> {
    meta: OcsMeta,
    data: T,
}

/// Response envelope every endpoint answers with: `{"ocs": {"meta": ..., "data": ...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Ocs<T> {
    ocs: Layer<T>,
}

impl<T> Ocs<T> {
    pub fn meta(&self) -> &OcsMeta {
        &self.ocs.meta
    }

    pub fn data(&self) -> &T {
        &self.ocs.data
    }

    pub fn into_data(self) -> T {
        self.ocs.data
    }

    pub fn into_parts(self) -> (OcsMeta, T) {
        (self.ocs.meta, self.ocs.data)
    }
}
