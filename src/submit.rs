//! Encoding of the edited flag into the submitted form body

use serde::Serialize;
use tracing::info;

use crate::editor::ListEditor;
use crate::errors::{EditorError, EditorResult};
use crate::models::{FlagProperties, FlagValue, FlagVisibility};

/// Form fields posted on submit; both lists travel as JSON text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitForm {
    pub flag_name: String,
    pub flag_desc: String,
    pub flag_sort: String,
    pub values: String,
    pub visibility: String,
}

impl SubmitForm {
    pub fn build(
        properties: &FlagProperties,
        values: &[FlagValue],
        visibility: &[FlagVisibility],
    ) -> EditorResult<Self> {
        Ok(Self {
            flag_name: properties.name.clone(),
            flag_desc: properties.description.clone(),
            flag_sort: properties.sortkey.clone(),
            values: serde_json::to_string(values).map_err(|source| EditorError::Encode {
                field: "values",
                source,
            })?,
            visibility: serde_json::to_string(visibility).map_err(|source| {
                EditorError::Encode {
                    field: "visibility",
                    source,
                }
            })?,
        })
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_body(&self) -> EditorResult<String> {
        Ok(serde_urlencoded::to_string(self)?)
    }
}

/// Encode the editor's current state
pub fn encode_form(properties: &FlagProperties, editor: &ListEditor) -> EditorResult<String> {
    let form = SubmitForm::build(properties, editor.values(), editor.visibility())?;
    let body = form.to_body()?;
    info!(
        "Encoded form with {} values and {} visibility rules ({} bytes)",
        editor.values().len(),
        editor.visibility().len(),
        body.len()
    );
    Ok(body)
}
