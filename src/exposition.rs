//! Prometheus text exposition of a metric set.

use std::fmt::Write;

use crate::model::{MetricFamily, MetricSet};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders every family with its HELP/TYPE preamble, in set order.
///
/// Families without records still get their preamble so scrapers see a
/// stable set of metric names.
pub fn render(set: &MetricSet, prefix: &str) -> String {
    let mut output = String::with_capacity(set.record_count() * 96 + set.families.len() * 128);
    for family in &set.families {
        render_family(&mut output, family, prefix);
    }
    output
}

fn render_family(output: &mut String, family: &MetricFamily, prefix: &str) {
    let name = metric_name(prefix, family.kind.name());

    writeln!(output, "# HELP {} {}", name, family.kind.help()).ok();
    writeln!(output, "# TYPE {} gauge", name).ok();
    for record in &family.records {
        writeln!(
            output,
            "{}{} {}",
            name,
            format_labels(&record.labels),
            format_value(record.value)
        )
        .ok();
    }
}

fn metric_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}_{}", prefix, name)
    }
}

/// Escape special characters in label values.
fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn format_labels(labels: &[(&'static str, String)]) -> String {
    if labels.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect();

    format!("{{{}}}", parts.join(","))
}
