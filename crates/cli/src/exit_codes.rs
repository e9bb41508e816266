//! CLI Exit Code Registry
//!
//! Single source of truth for `shelfcheck` exit codes. Scripts rely on
//! these values.
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | 0    | Success                                             |
//! | 1    | General error (writing output failed)               |
//! | 2    | Usage error (bad args, unreadable or invalid config)|
//! | 3    | An input file could not be decoded                  |
//! | 4    | Inventory layout mismatch                           |
//! | 5    | Sales report lacks a code column                    |
//! | 6    | `config check` found an invalid file                |
//! | 10   | Every narrative candidate failed                    |

use shelfcheck_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - output could not be written.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid config.
pub const EXIT_USAGE: u8 = 2;

/// Sales or inventory file could not be decoded in any supported format.
pub const EXIT_DECODE: u8 = 3;

/// Inventory report is narrower than the positional layout requires.
pub const EXIT_LAYOUT: u8 = 4;

/// Sales report has no column matching any code label.
pub const EXIT_MISSING_COLUMN: u8 = 5;

/// `config check` rejected the file.
pub const EXIT_CONFIG_INVALID: u8 = 6;

/// Narrative requested and no candidate produced text.
/// The dashboard has already been printed when this is returned.
pub const EXIT_NARRATIVE_EXHAUSTED: u8 = 10;

pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::Layout { .. } => EXIT_LAYOUT,
        ReconError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_USAGE,
    }
}
