//! Query parameters for collection calls.

/// Parameters restricting a list call.
///
/// An unset selector sends no query parameter at all; "everything matches an
/// empty selector" is server behavior and is deliberately not re-implemented
/// client-side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    /// Label selector in `key=value,key2=value2` form
    pub label_selector: Option<String>,
}

impl ListParams {
    /// Restrict the list to objects matching a label selector
    pub fn labels(selector: impl Into<String>) -> Self {
        ListParams {
            label_selector: Some(selector.into()),
        }
    }

    /// The query pairs to append to the list request
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        if let Some(selector) = &self.label_selector {
            pairs.push(("labels", selector.as_str()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::ListParams;

    #[test]
    fn default_params_send_no_query() {
        assert!(ListParams::default().query_pairs().is_empty());
    }

    #[test]
    fn selector_renders_as_the_labels_parameter() {
        let lp = ListParams::labels("name=kubernetes-test-pod-label,label1=value1");
        assert_eq!(
            lp.query_pairs(),
            vec![("labels", "name=kubernetes-test-pod-label,label1=value1")]
        );
    }
}
