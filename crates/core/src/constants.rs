/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for percentage (ratio) figures
pub const PERCENTAGE_PRECISION: u32 = 4;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Quantity threshold for significant positions
pub const QUANTITY_THRESHOLD: &str = "0.00000001";

/// Quote currency appended to bare crypto symbols (e.g. `BTC` -> `BTC-USD`)
pub const DEFAULT_QUOTE_CURRENCY: &str = "USD";

/// Separators that mark an instrument key as an already-paired symbol
pub const PAIR_SEPARATORS: &[char] = &['-', '/', ':'];

/// Separator used when pairing a bare crypto symbol with the quote currency
pub const PAIR_SEPARATOR: char = '-';
