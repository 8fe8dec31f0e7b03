//! Projection of configuration entities to their wire formats.
//!
//! Everything in this workspace that ends up on disk goes through these
//! helpers: YAML for Prometheus, Alertmanager, and operator resources,
//! pretty-printed JSON for Grafana dashboard bodies. Blanket impls keep
//! the call sites uniform: any `Serialize` type gets [`ToYaml`] and
//! [`ToJsonPretty`] for free.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// YAML projection for configuration entities.
pub trait ToYaml: Serialize {
    /// Renders the entity as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] when the value cannot be
    /// represented, e.g. a map with non-string keys.
    fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Renders the entity as YAML bytes, ready for a byte-oriented sink.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ToYaml::to_yaml`].
    fn to_yaml_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_yaml()?.into_bytes())
    }

    /// Renders the entity and writes it to `path` with mode 0644.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] when rendering fails and
    /// [`crate::Error::Io`] when the write fails.
    fn write_yaml(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let rendered = self.to_yaml()?;
        fs::write(path, &rendered)?;
        // The mode is part of the contract, independent of umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
        }
        debug!(path = %path.display(), bytes = rendered.len(), "wrote YAML document");
        Ok(())
    }

    /// Renders the entity, panicking on failure.
    ///
    /// Reserved for build-time code paths, catalog constants and the
    /// like, where a serialization failure is a programmer error rather
    /// than a runtime condition.
    ///
    /// # Panics
    ///
    /// Panics when rendering fails.
    #[allow(clippy::expect_used)]
    #[must_use]
    fn to_yaml_or_panic(&self) -> String {
        self.to_yaml()
            .expect("serialization of a well-formed entity cannot fail")
    }
}

impl<T: Serialize> ToYaml for T {}

/// Pretty JSON projection, two-space indented.
pub trait ToJsonPretty: Serialize {
    /// Renders the entity as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] when the value cannot be
    /// represented as JSON.
    fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Renders the entity as pretty JSON, panicking on failure.
    ///
    /// Same contract as [`ToYaml::to_yaml_or_panic`]: build-time paths
    /// only.
    ///
    /// # Panics
    ///
    /// Panics when rendering fails.
    #[allow(clippy::expect_used)]
    #[must_use]
    fn to_json_pretty_or_panic(&self) -> String {
        self.to_json_pretty()
            .expect("serialization of a well-formed entity cannot fail")
    }
}

impl<T: Serialize> ToJsonPretty for T {}

/// Joins independently rendered YAML documents into one multi-document
/// stream with `---` separators, the form `kubectl apply -f` accepts.
///
/// # Errors
///
/// Returns the first rendering error encountered.
pub fn to_multi_yaml<'a, T, I>(entities: I) -> Result<String>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let docs: Vec<String> = entities
        .into_iter()
        .map(|entity| entity.to_yaml())
        .collect::<Result<_>>()?;
    Ok(docs.join("---\n"))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        replicas: u32,
    }

    fn sample() -> Sample {
        Sample {
            name: "gateway".to_string(),
            replicas: 3,
        }
    }

    #[test]
    fn yaml_uses_field_order() {
        let yaml = sample().to_yaml().unwrap();
        assert_eq!(yaml, "name: gateway\nreplicas: 3\n");
    }

    #[test]
    fn json_pretty_is_two_space_indented() {
        let json = sample().to_json_pretty().unwrap();
        assert_eq!(json, "{\n  \"name\": \"gateway\",\n  \"replicas\": 3\n}");
    }

    #[test]
    fn multi_yaml_separates_documents() {
        let entities = vec![sample(), sample()];
        let stream = to_multi_yaml(&entities).unwrap();
        assert_eq!(
            stream,
            "name: gateway\nreplicas: 3\n---\nname: gateway\nreplicas: 3\n"
        );
    }

    #[test]
    fn multi_yaml_of_nothing_is_empty() {
        let entities: Vec<Sample> = Vec::new();
        assert_eq!(to_multi_yaml(&entities).unwrap(), "");
    }

    #[test]
    fn btreemap_keys_are_sorted() {
        let mut labels = BTreeMap::new();
        labels.insert("severity", "critical");
        labels.insert("app", "gateway");
        let yaml = serde_yaml::to_string(&labels).unwrap();
        assert_eq!(yaml, "app: gateway\nseverity: critical\n");
    }

    #[test]
    fn write_yaml_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.yaml");
        sample().write_yaml(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "name: gateway\nreplicas: 3\n");
    }

    #[cfg(unix)]
    #[test]
    fn write_yaml_sets_expected_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.yaml");
        sample().write_yaml(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn panicking_variant_renders_same_bytes() {
        assert_eq!(sample().to_yaml_or_panic(), sample().to_yaml().unwrap());
        assert_eq!(
            sample().to_json_pretty_or_panic(),
            sample().to_json_pretty().unwrap()
        );
    }

    #[test]
    fn yaml_bytes_match_the_string_form() {
        assert_eq!(
            sample().to_yaml_bytes().unwrap(),
            sample().to_yaml().unwrap().into_bytes()
        );
    }
}
