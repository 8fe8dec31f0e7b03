//! The dashboard model, kept to the keys Grafana actually reads.

use serde::{Deserialize, Serialize};

/// Schema version emitted for new dashboards.
///
/// Grafana migrates older schemas on import, so this only needs to be
/// recent enough that nothing we emit predates it.
pub const SCHEMA_VERSION: u32 = 36;

/// One dashboard, serialized as the JSON document Grafana imports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Stable identifier for URLs and cross-links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Display title.
    pub title: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display time zone, `browser` or an IANA name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Dashboard schema version; see [`SCHEMA_VERSION`].
    pub schema_version: u32,
    /// Auto-refresh interval, e.g. `30s`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,
    /// Initial time window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeWindow>,
    /// Template variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templating: Option<Templating>,
    /// Panels, in layout order.
    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Dashboard {
    /// Creates an empty dashboard with the current schema version.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: None,
            title: title.into(),
            tags: Vec::new(),
            timezone: None,
            schema_version: SCHEMA_VERSION,
            refresh: None,
            time: None,
            templating: None,
            panels: Vec::new(),
        }
    }

    /// Sets the stable identifier.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Adds a search tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the display time zone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the auto-refresh interval.
    #[must_use]
    pub fn with_refresh(mut self, refresh: impl Into<String>) -> Self {
        self.refresh = Some(refresh.into());
        self
    }

    /// Sets the initial time window.
    #[must_use]
    pub fn with_time(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.time = Some(TimeWindow {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Adds a template variable.
    #[must_use]
    pub fn with_variable(mut self, variable: TemplateVar) -> Self {
        self.templating
            .get_or_insert_with(Templating::default)
            .list
            .push(variable);
        self
    }

    /// Adds a panel.
    #[must_use]
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }
}

/// The initial time window, relative expressions allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start, e.g. `now-6h`.
    pub from: String,
    /// Window end, e.g. `now`.
    pub to: String,
}

/// The template variable list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templating {
    /// Variables, in display order.
    #[serde(default)]
    pub list: Vec<TemplateVar>,
}

/// One template variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVar {
    /// Variable name, referenced as `$name` in panel queries.
    pub name: String,
    /// Display label; the name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Variable kind, e.g. `query` or `interval`.
    #[serde(rename = "type")]
    pub var_type: String,
    /// Source query for `query` variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Datasource the query runs against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
}

impl TemplateVar {
    /// Creates a `query` variable populated from a metrics query.
    #[must_use]
    pub fn query(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            var_type: "query".to_string(),
            query: Some(query.into()),
            datasource: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// One panel; rows are panels of type `row` spanning the full width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// Unique id within the dashboard.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Panel kind, e.g. `timeseries`, `stat`, `row`.
    #[serde(rename = "type")]
    pub panel_type: String,
    /// Datasource name; the default datasource when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,
    /// Placement on the 24-column grid.
    pub grid_pos: GridPos,
    /// Queries feeding the panel.
    #[serde(default)]
    pub targets: Vec<Target>,
    /// Display unit, e.g. `percentunit` or `bytes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Panel {
    /// Creates a full-width row header.
    #[must_use]
    pub fn row(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            panel_type: "row".to_string(),
            datasource: None,
            grid_pos: GridPos::new(1, 24, 0, 0),
            targets: Vec::new(),
            unit: None,
        }
    }

    /// Creates a half-width time series panel.
    #[must_use]
    pub fn timeseries(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            panel_type: "timeseries".to_string(),
            datasource: None,
            grid_pos: GridPos::new(8, 12, 0, 0),
            targets: Vec::new(),
            unit: None,
        }
    }

    /// Creates a small single-value panel.
    #[must_use]
    pub fn stat(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            panel_type: "stat".to_string(),
            datasource: None,
            grid_pos: GridPos::new(4, 6, 0, 0),
            targets: Vec::new(),
            unit: None,
        }
    }

    /// Moves the panel to a grid position.
    #[must_use]
    pub fn at(mut self, x: u32, y: u32) -> Self {
        self.grid_pos.x = x;
        self.grid_pos.y = y;
        self
    }

    /// Resizes the panel.
    #[must_use]
    pub fn sized(mut self, w: u32, h: u32) -> Self {
        self.grid_pos.w = w;
        self.grid_pos.h = h;
        self
    }

    /// Sets the datasource.
    #[must_use]
    pub fn with_datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = Some(datasource.into());
        self
    }

    /// Adds a query.
    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Sets the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Placement on Grafana's 24-column grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    /// Height in grid rows.
    pub h: u32,
    /// Width in grid columns, 24 is full width.
    pub w: u32,
    /// Column offset.
    pub x: u32,
    /// Row offset.
    pub y: u32,
}

impl GridPos {
    /// Creates a placement.
    #[must_use]
    pub fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }
}

/// One query on a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// The PromQL expression, carried as its rendered string.
    pub expr: String,
    /// Series naming template, e.g. `{{instance}}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,
    /// Query letter; panels with several queries need distinct ones.
    pub ref_id: String,
}

impl Target {
    /// Creates query `A` from an expression.
    #[must_use]
    pub fn expr(expr: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            legend_format: None,
            ref_id: "A".to_string(),
        }
    }

    /// Sets the series naming template.
    #[must_use]
    pub fn with_legend(mut self, legend: impl Into<String>) -> Self {
        self.legend_format = Some(legend.into());
        self
    }

    /// Changes the query letter.
    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }
}
