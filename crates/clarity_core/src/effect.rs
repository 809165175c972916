use crate::{RequestAction, RequestId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenPicker {
        kinds: DocumentKinds,
    },
    Upload {
        request_id: RequestId,
        file: SelectedFile,
        action: RequestAction,
    },
}

/// Document types the picker is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentKinds {
    pub mime_types: Vec<String>,
}

impl Default for DocumentKinds {
    fn default() -> Self {
        Self {
            mime_types: vec![
                "text/plain".to_string(),
                "application/pdf".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
            ],
        }
    }
}
