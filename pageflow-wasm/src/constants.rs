/// Id of the optional `<script type="application/json">` configuration block.
pub const CONFIG_ELEMENT_ID: &str = "pageflow-config";
/// Viewport width assumed when `innerWidth` cannot be read (px).
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 1024.0;
