//! Native type names to canonical type names

/// Result of mapping a native type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// Canonical, lower-case type name (`int`, `varchar`, `decimal`, ...)
    pub canonical: String,
    /// Length or precision from the type's arguments, e.g. 255 for `varchar(255)`
    pub length: Option<u64>,
}

/// Pure lookup from a native type name to a canonical type.
pub trait TypeMapper {
    fn map_native_type(&self, native_type: &str) -> MappedType;
}

/// MySQL type names to canonical names.
///
/// Aliases collapse to one spelling (`integer` -> `int`, `numeric` ->
/// `decimal`, `boolean` -> `bool`); unknown names pass through lower-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlTypeMapper;

impl SqlTypeMapper {
    fn canonical_name(base: &str) -> &str {
        match base {
            "integer" => "int",
            "dec" | "numeric" | "fixed" => "decimal",
            "real" | "double precision" => "double",
            "boolean" => "bool",
            "character" => "char",
            "character varying" => "varchar",
            other => other,
        }
    }
}

impl TypeMapper for SqlTypeMapper {
    fn map_native_type(&self, native_type: &str) -> MappedType {
        let lowered = native_type.trim().to_ascii_lowercase();

        // Drivers may report `UNSIGNED INT`; the DDL says `int(10) unsigned`.
        let mut words: Vec<&str> = lowered
            .split_whitespace()
            .filter(|w| !matches!(*w, "unsigned" | "signed" | "zerofill"))
            .collect();
        if words.is_empty() {
            words.push("");
        }
        let name = words.join(" ");

        let (base, args) = match name.find('(') {
            Some(idx) => (name[..idx].trim(), Some(&name[idx + 1..])),
            None => (name.as_str(), None),
        };

        let length = args.and_then(|args| {
            args.split([',', ')'])
                .next()
                .and_then(|first| first.trim().parse::<u64>().ok())
        });

        MappedType {
            canonical: Self::canonical_name(base).to_string(),
            length,
        }
    }
}

/// Whether a canonical type belongs to the character/text family.
pub fn is_character_type(canonical: &str) -> bool {
    let lowered = canonical.to_ascii_lowercase();
    lowered.contains("char") || lowered.contains("text")
}
