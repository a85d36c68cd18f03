// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across great-scott

// Django Configuration
pub const GREAT_SCOTT_PYTHON: &str = "GREAT_SCOTT_PYTHON";
pub const GREAT_SCOTT_MANAGE_PY: &str = "GREAT_SCOTT_MANAGE_PY";

// Output Configuration
pub const GREAT_SCOTT_LOG: &str = "GREAT_SCOTT_LOG";
pub const GREAT_SCOTT_NO_COLOR: &str = "GREAT_SCOTT_NO_COLOR";

// Hook Script Variables (exported by the generated git hooks)
pub const GS_PRE_CHECKOUT: &str = "GS_PRE_CHECKOUT";
pub const GS_DST_BRANCH: &str = "GS_DST_BRANCH";

// Defaults
pub const DEFAULT_PYTHON: &str = "python";
pub const DEFAULT_MANAGE_PY: &str = "manage.py";
pub const DEFAULT_LOG_FILTER: &str = "warn";
