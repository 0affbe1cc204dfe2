use bevy::prelude::*;
use serde::Deserialize;

/// One labelled vector from a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchItem {
    pub label: String,
    pub vector: Vec<f64>,
}

/// `{ "items": [{ "label": ..., "vector": [...] }, ...] }`
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct BatchManifest {
    pub items: Vec<BatchItem>,
}

impl BatchManifest {
    /// Split into index-aligned labels and vectors.
    pub fn into_columns(self) -> (Vec<String>, Vec<Vec<f64>>) {
        self.items
            .into_iter()
            .map(|item| (item.label, item.vector))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_splits_into_columns() {
        let json = r#"{"items":[{"label":"cat","vector":[0.1,0.2]},{"label":"dog","vector":[0.3,0.4]}]}"#;
        let manifest: BatchManifest = serde_json::from_str(json).unwrap();
        let (labels, vectors) = manifest.into_columns();
        assert_eq!(labels, vec!["cat", "dog"]);
        assert_eq!(vectors[1], vec![0.3, 0.4]);
    }
}
