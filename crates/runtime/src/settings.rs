//! Persisted companion preferences stored on the page itself.

use crate::page::PageStorage;
use crate::repository::Result;

/// Page key holding the expand-flames-table preference.
pub const EXPAND_FLAMES_KEY: &str = "whackybeanz-expand-flames";

/// Read the expand-flames flag. Anything other than `"true"` reads as off.
pub fn read_expand_flames(page: &impl PageStorage) -> Result<bool> {
    Ok(page.get_item(EXPAND_FLAMES_KEY)?.as_deref() == Some("true"))
}

pub fn write_expand_flames(page: &impl PageStorage, enable: bool) -> Result<()> {
    page.set_item(EXPAND_FLAMES_KEY, if enable { "true" } else { "false" })
}
