//! Engine Constants
//!
//! Centralized defaults shared by the config, services and state layers.

/// Default backend base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Log file prefix for the rolling appender
pub const LOG_FILE_PREFIX: &str = "feeder-view.log";

/// Activity log capacity per session
pub const ACTIVITY_LOG_CAPACITY: usize = 500;

/// Longest message kept in the activity log
pub const ACTIVITY_MESSAGE_MAX_LEN: usize = 240;

/// Maximum completions applied by a single `pump` call
pub const PUMP_BATCH_SIZE: usize = 256;

/// Endpoint paths
pub const PATH_ASSET_GEOJSONS: &str = "/assets/geojsons";
pub const PATH_ASSET_METRICS: &str = "/assets/metrics";
pub const PATH_TIMESERIES_METRICS: &str = "/metrics/timeseries";
pub const PATH_SYSTEM_METRICS: &str = "/metrics/system_metrics";
pub const PATH_SNAPSHOTS: &str = "/snapshots";
pub const PATH_SCENARIO_SYSTEM_METRICS: &str = "/scenarios/system_metrics";
pub const PATH_SCENARIO_ASSET_METRICS: &str = "/scenarios/timeseries_asset";
pub const PATH_MAP_CENTER: &str = "/map_center";

/// Channel scale applied when mapping a normalized value to an 8-bit color
pub const COLOR_CHANNEL_MAX: f64 = 255.0;

/// Radius multiplier for risk markers on node maps
pub const NODE_RADIUS_SCALE: f64 = 20.0;
