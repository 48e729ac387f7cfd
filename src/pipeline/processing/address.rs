use crate::constants::COUNTRY_SUFFIX;

/// Coalesced address parts, in display order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressParts<'a> {
    pub street: &'a str,
    pub number: &'a str,
    pub neighborhood: &'a str,
    pub city: &'a str,
    pub state: &'a str,
}

/// Builds the single-line display address, e.g.
/// `"Rua X, 10, Centro, Niterói, RJ, Brasil"`.
///
/// The complement is not part of the display address. With no parts at all
/// the result is `""`, never the bare country suffix.
pub fn assemble(parts: &AddressParts<'_>) -> String {
    let state = parts.state.to_uppercase();
    let present: Vec<&str> = [
        parts.street,
        parts.number,
        parts.neighborhood,
        parts.city,
        state.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();

    if present.is_empty() {
        return String::new();
    }
    format!("{}, {}", present.join(", "), COUNTRY_SUFFIX)
}
