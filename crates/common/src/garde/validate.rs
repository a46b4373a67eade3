//! Garde validation for service settings.

use crate::domain::DomainError;
use garde::{Report, Validate};

/// Validate settings loaded from the environment.
///
/// Every failing field is reported, one `field: message` pair per line, under
/// a single `invalid configuration` heading.
pub fn validate_config<T>(settings: &T) -> Result<(), DomainError>
where
    T: Validate,
    T::Context: Default,
{
    settings
        .validate()
        .map_err(|report| DomainError::ValidationError(describe(&report)))
}

fn describe(report: &Report) -> String {
    let mut problems: Vec<String> = report
        .iter()
        .map(|(path, error)| match path.to_string() {
            field if field.is_empty() => error.message().to_string(),
            field => format!("{field}: {}", error.message()),
        })
        .collect();
    problems.sort();

    format!("invalid configuration:\n  {}", problems.join("\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use garde::Validate;

    #[derive(Validate)]
    struct WorkerSettings {
        #[garde(length(min = 1))]
        insert_action: String,
        #[garde(skip)]
        _verbose: bool,
    }

    #[test]
    fn test_validate_success() {
        let settings = WorkerSettings {
            insert_action: "insert".to_string(),
            _verbose: false,
        };
        assert!(validate_config(&settings).is_ok());
    }

    #[test]
    fn test_validate_lists_every_failing_field() {
        #[derive(Validate)]
        struct Pair {
            #[garde(length(min = 1))]
            subject: String,
            #[garde(length(min = 1))]
            insert_action: String,
        }

        let pair = Pair {
            subject: String::new(),
            insert_action: String::new(),
        };
        let Err(DomainError::ValidationError(msg)) = validate_config(&pair) else {
            panic!("Expected ValidationError");
        };

        let lines: Vec<&str> = msg.lines().skip(1).map(str::trim).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("insert_action: "));
        assert!(lines[1].starts_with("subject: "));
    }

    #[test]
    fn test_validate_error_names_field() {
        let settings = WorkerSettings {
            insert_action: String::new(),
            _verbose: false,
        };
        match validate_config(&settings) {
            Err(DomainError::ValidationError(msg)) => {
                assert!(msg.starts_with("invalid configuration:"));
                assert!(msg.contains("insert_action: "));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
