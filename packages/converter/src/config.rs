//! Configuration constants for the converter.
//!
//! Field names that drive the injector are deliberately named here rather
//! than buried as literals: the classification holder, the code field under
//! it, and the index column used to key the classification file are the
//! three knobs the original FDA pipeline exposes.

/// Default column that indexes each line of the classification file.
pub const DEFAULT_INDEX_FIELD: &str = "PRODUCTCODE";

/// Default tag that marks the repeating record in streaming mode.
pub const DEFAULT_SEARCH_TAG: &str = "device";

/// Default field under which product classification data is nested.
pub const DEFAULT_HOLDER_FIELD: &str = "fda_product_code";

/// Default field holding the literal product code to look up.
pub const DEFAULT_CODE_FIELD: &str = "product_code";

/// Default field the injector attaches lookup results under.
pub const DEFAULT_ENRICHMENT_FIELD: &str = "openfda";

/// Column delimiter of the classification flat file.
pub const CLASSIFICATION_DELIMITER: char = '|';

/// Key the converter stores element attributes under.
pub const ATTRIBS_FIELD: &str = "attribs";

/// Key the converter stores mixed element text under.
pub const TEXT_FIELD: &str = "text";

/// Top-level wrapper key used by the streaming reader.
pub const DATA_FIELD: &str = "data";
