use error_stack::{Context, Report};

/// Figment errors only tell what went wrong in their `Display`
/// output. This spreads the interesting parts (the kind, the key and
/// the source) into separate report attachments.
pub trait FigmentErrorAttachable<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, e: figment::Error) -> Report<T> {
        let mut report = self;
        for error in e {
            report = report.attach_printable(error.kind.to_string());

            if let (Some(profile), Some(md)) = (&error.profile, &error.metadata) {
                if !error.path.is_empty() {
                    let key = md.interpolate(profile, &error.path);
                    report = report.attach_printable(format!("for key {key:?}"));
                }
            }

            if let Some(md) = &error.metadata {
                if let Some(source) = &md.source {
                    report = report.attach_printable(format!("in {source} {}", md.name));
                } else {
                    report = report.attach_printable(format!("in {}", md.name));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::{providers::Serialized, Figment};

    #[derive(Debug, thiserror::Error)]
    #[error("could not load")]
    struct Load;

    #[test]
    fn test_attaches_key_of_invalid_value() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Config {
            port: u16,
        }

        let error = Figment::new()
            .merge(Serialized::default("port", "not a number"))
            .extract::<Config>()
            .unwrap_err();

        let report = Report::new(Load).attach_figment_error(error);
        let rendered = format!("{report:?}");
        assert!(rendered.contains("port"), "{rendered}");
    }
}
