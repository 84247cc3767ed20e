use std::borrow::Cow;

/// Whole-sheet range used when reading, appending or clearing without an explicit range.
pub const DEFAULT_RANGE: &str = "A:ZZ";

/// Anchor used when writing without an explicit range.
pub const DEFAULT_WRITE_ANCHOR: &str = "A1";

/// Sheet name as it must appear before `!` in A1 notation.
///
/// Plain identifiers are used as-is. Anything else is wrapped in single
/// quotes with embedded quotes doubled, e.g. `'Q1 ''24'`. Names the backend
/// would parse as a cell (`FY24`, `R1C1`) are quoted too, so a bare sheet
/// name still selects the whole sheet.
pub fn sheet_reference(sheet_name: &str) -> Cow<'_, str> {
    let mut chars = sheet_name.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    let plain = identifier && !is_a1_cell(sheet_name) && !is_r1c1_cell(sheet_name);

    match plain {
        true => Cow::Borrowed(sheet_name),
        false => Cow::Owned(format!("'{}'", sheet_name.replace('\'', "''"))),
    }
}

// Column letters followed by a row number, e.g. `A1`, `FY24`, `XFD1048576`.
pub(crate) fn is_a1_cell(name: &str) -> bool {
    let letters = name.bytes().take_while(u8::is_ascii_alphabetic).count();
    let digits = &name[letters..];
    (1..=3).contains(&letters) && !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// `R<n>C<n>` with either number optional, e.g. `R1C1`, `RC`, `r2c`.
fn is_r1c1_cell(name: &str) -> bool {
    let Some(rest) = name.strip_prefix(['R', 'r']) else {
        return false;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    rest.strip_prefix(['C', 'c'])
        .is_some_and(|cols| cols.bytes().all(|b| b.is_ascii_digit()))
}

/// Build `"{sheet}!{range}"`, substituting `default` for a blank range.
pub fn qualified_range(sheet_name: &str, range: &str, default: &str) -> String {
    let range = match range.trim() {
        "" => default,
        trimmed => trimmed,
    };
    format!("{}!{}", sheet_reference(sheet_name), range)
}
