//! Render: turns [`LogRecord`]s into output lines for the binary.
//!
//! Two modes, picked by [`OutputMode`]:
//!
//! - **json**: one object per record. With no column selection the whole
//!   record is serialized; otherwise only the selected columns, keyed by their
//!   selector text.
//! - **tsv**: the selected columns joined by tabs. Unset values and absent
//!   keys render as empty cells.

use alf_core::config::OutputMode;
use alf_core::{Attr, LogRecord, Target, Value};

/// One output column, parsed from `attrName` or `mapName:key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    label: String,
    target: Target,
}

impl Column {
    pub fn parse(selector: &str) -> alf_core::Result<Self> {
        Ok(Self {
            label: selector.to_string(),
            target: selector.parse()?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Parse a comma-separated column list. Blank entries are ignored.
pub fn parse_columns(list: &str) -> alf_core::Result<Vec<Column>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Column::parse)
        .collect()
}

/// Formats records according to the configured output mode.
#[derive(Debug, Clone)]
pub struct Renderer {
    mode: OutputMode,
    columns: Vec<Column>,
    timestamp_format: String,
}

impl Renderer {
    pub fn new(mode: OutputMode, columns: Vec<Column>, timestamp_format: impl Into<String>) -> Self {
        Self {
            mode,
            columns,
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Header line for TSV output, `None` in JSON mode.
    pub fn header(&self) -> Option<String> {
        match self.mode {
            OutputMode::Json => None,
            OutputMode::Tsv => Some(
                self.columns
                    .iter()
                    .map(Column::label)
                    .collect::<Vec<_>>()
                    .join("\t"),
            ),
        }
    }

    pub fn render(&self, record: &LogRecord) -> serde_json::Result<String> {
        match self.mode {
            OutputMode::Json if self.columns.is_empty() => serde_json::to_string(record),
            OutputMode::Json => {
                let mut object = serde_json::Map::new();
                for column in &self.columns {
                    object.insert(column.label.clone(), self.json_cell(record, &column.target)?);
                }
                serde_json::to_string(&object)
            }
            OutputMode::Tsv => Ok(self
                .columns
                .iter()
                .map(|column| self.text_cell(record, &column.target))
                .collect::<Vec<_>>()
                .join("\t")),
        }
    }

    fn json_cell(&self, record: &LogRecord, target: &Target) -> serde_json::Result<serde_json::Value> {
        match target {
            Target::Scalar(attr) => serde_json::to_value(record.get(*attr)),
            Target::Keyed(map, key) => Ok(record
                .map(*map)
                .get(key)
                .map_or(serde_json::Value::Null, |v| serde_json::Value::String(v.clone()))),
            Target::Time(_) => serde_json::to_value(record.get(Attr::ReqTime)),
        }
    }

    fn text_cell(&self, record: &LogRecord, target: &Target) -> String {
        match target {
            Target::Scalar(attr) => match record.get(*attr) {
                Value::Time(ts) => ts.format(&self.timestamp_format).to_string(),
                value => value.to_string(),
            },
            Target::Keyed(map, key) => record.map(*map).get(key).cloned().unwrap_or_default(),
            Target::Time(_) => self.text_cell(record, &Target::Scalar(Attr::ReqTime)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> LogRecord {
        let mut record = LogRecord::new();
        record.log_value("clientIP", "127.0.0.1").unwrap();
        record.log_value("lastStatus", "200").unwrap();
        record.log_value("reqTime", "24/Mar/2012:22:36:29 +0000").unwrap();
        record.log_value("reqHeader:Referer", "-").unwrap();
        record
    }

    #[test]
    fn tsv_columns() {
        let columns = parse_columns("clientIP, lastStatus,reqTime,reqHeader:Referer,cookie:sid").unwrap();
        let renderer = Renderer::new(OutputMode::Tsv, columns, "%Y-%m-%d");
        assert_eq!(
            renderer.header().unwrap(),
            "clientIP\tlastStatus\treqTime\treqHeader:Referer\tcookie:sid"
        );
        assert_eq!(renderer.render(&record()).unwrap(), "127.0.0.1\t200\t2012-03-24\t-\t");
    }

    #[test]
    fn json_selected_columns() {
        let columns = parse_columns("clientIP,lastStatus,completeConnStatus,cookie:sid").unwrap();
        let renderer = Renderer::new(OutputMode::Json, columns, "%Y");
        assert_eq!(renderer.header(), None);
        let rendered: serde_json::Value = serde_json::from_str(&renderer.render(&record()).unwrap()).unwrap();
        assert_eq!(
            rendered,
            serde_json::json!({
                "clientIP": "127.0.0.1",
                "lastStatus": 200,
                "completeConnStatus": null,
                "cookie:sid": null
            })
        );
    }

    #[test]
    fn unknown_column_is_rejected() {
        assert!(parse_columns("clientIP,doesntExist").is_err());
    }
}
