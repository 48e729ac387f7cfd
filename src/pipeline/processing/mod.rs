pub mod address;
pub mod fields;
pub mod normalize;
pub mod specialties;

pub use address::{assemble, AddressParts};
pub use fields::{cnpj_key, coalesce, parse_coordinate, plain_integer};
pub use normalize::{canonical_label, LabelDictionary};
pub use specialties::{dedup_facts, extract_facts};
