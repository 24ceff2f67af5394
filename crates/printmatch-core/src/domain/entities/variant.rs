//! Records exchanged with the variant and file stores.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{PrintFileId, VariantId};

/// A concrete product variant as the variant store reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub id: VariantId,
    pub full_sku: String,
    #[serde(default)]
    pub print_file_id: Option<PrintFileId>,
}

impl VariantRecord {
    pub fn new(id: VariantId, full_sku: impl Into<String>) -> Self {
        Self {
            id,
            full_sku: full_sku.into(),
            print_file_id: None,
        }
    }
}

/// An uploaded production asset. Only its name is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintFile {
    pub id: PrintFileId,
    pub file_name: String,
    pub mime_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PrintFile {
    pub fn new(id: PrintFileId, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}
