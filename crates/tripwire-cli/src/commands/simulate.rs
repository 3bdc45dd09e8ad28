//! Scripted calls through a circuit breaker

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use tripwire_core::{CircuitBreakerRegistry, TripwireConfig, TripwireError};

use crate::console::CliConsole;

/// One step of a simulation script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Succeed,
    Fail,
    Sleep(Duration),
}

impl FromStr for Step {
    type Err = TripwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let step = s.trim();
        match step {
            "ok" | "success" => Ok(Self::Succeed),
            "fail" | "error" => Ok(Self::Fail),
            _ => {
                let millis = step
                    .strip_prefix("sleep:")
                    .and_then(|ms| ms.parse::<u64>().ok())
                    .ok_or_else(|| {
                        TripwireError::invalid_input_field(
                            format!("Unknown step '{}', expected ok, fail or sleep:<millis>", step),
                            "script",
                        )
                    })?;
                Ok(Self::Sleep(Duration::from_millis(millis)))
            }
        }
    }
}

/// Parse a comma separated script, ignoring empty entries
pub fn parse_script(script: &str) -> Result<Vec<Step>, TripwireError> {
    script
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Run `script` against the breaker for `name` and print the final metrics
pub async fn run(
    config: &TripwireConfig,
    name: &str,
    script: &str,
    fallback: Option<String>,
) -> anyhow::Result<()> {
    let console = CliConsole::new(true);
    let steps = parse_script(script).context("Invalid simulation script")?;
    let registry = CircuitBreakerRegistry::from_settings(&config.circuit_breakers);
    let breaker = registry.get(name);

    console.print_header(&format!("Simulating '{}'", name));
    console.info(&format!(
        "failure_threshold={} success_threshold={} timeout={:?}",
        breaker.config().failure_threshold,
        breaker.config().success_threshold,
        breaker.config().timeout
    ));

    let mut call_number = 0;
    for step in steps {
        let succeed = match step {
            Step::Sleep(duration) => {
                tokio::time::sleep(duration).await;
                console.info(&format!("slept {:?}", duration));
                continue;
            }
            Step::Succeed => true,
            Step::Fail => false,
        };
        call_number += 1;

        let fallback = fallback.clone().map(|value| move || async move { Ok(value) });
        let outcome = breaker
            .execute(
                || async move {
                    if succeed {
                        Ok("ok".to_string())
                    } else {
                        Err("simulated failure".to_string())
                    }
                },
                fallback,
            )
            .await;

        let line = format!("#{} -> {}", call_number, breaker.state());
        match outcome {
            Ok(value) => console.success(&format!("{} returned '{}'", line, value)),
            Err(e) if e.is_open() => console.warn(&format!("{} rejected: {}", line, e)),
            Err(e) => console.error(&format!("{} {}", line, e)),
        }
    }

    let metrics = serde_json::to_string_pretty(&registry.all_metrics())
        .context("Failed to serialize metrics")?;
    println!("{}", metrics);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let steps = parse_script("ok, fail,,sleep:250 ,error").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Succeed,
                Step::Fail,
                Step::Sleep(Duration::from_millis(250)),
                Step::Fail,
            ]
        );
    }

    #[test]
    fn test_parse_script_rejects_unknown_steps() {
        assert!(parse_script("ok,maybe").is_err());
        assert!(parse_script("sleep:soon").is_err());
    }

    #[tokio::test]
    async fn test_run_simulation() {
        let config = TripwireConfig::default();
        run(&config, "payments", "fail,ok,fail", Some("cached".into()))
            .await
            .unwrap();
    }
}
