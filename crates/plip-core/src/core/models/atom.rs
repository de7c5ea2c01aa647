use nalgebra::Point3;
use std::fmt;

/// Residue metadata attached to an atom by the perception stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueInfo {
    /// Chain identifier (e.g., 'A').
    pub chain: char,
    /// Residue sequence number as written in the source file.
    pub number: isize,
    /// Residue name (e.g., "ASP", "HOH", or a ligand HET code).
    pub name: String,
}

impl ResidueInfo {
    pub fn new(name: &str, number: isize, chain: char) -> Self {
        Self {
            chain,
            number,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResidueInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, self.number, self.chain)
    }
}

/// An atom as delivered by the upstream perception collaborator.
///
/// Atoms are read-only inside this crate. Features and interaction records
/// carry their own copies, so a record stays self-contained after the
/// originating structure is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Identity of the atom within the perceived structure.
    pub idx: usize,
    /// Index of the atom in the original structure file.
    pub orig_idx: usize,
    /// Element symbol (e.g., "C", "ZN").
    pub element: String,
    /// Atom type assigned by the perception toolkit (e.g., "C.ar", "O.co2").
    pub atom_type: String,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
    /// Parent residue, if the perception stage could resolve one.
    pub residue: Option<ResidueInfo>,
    /// Whether the atom belongs to a protein side chain.
    pub is_sidechain: bool,
}

impl Atom {
    /// Creates an atom without residue metadata.
    ///
    /// `orig_idx` defaults to `idx` and `atom_type` to the element symbol;
    /// both can be overwritten with the builder-style setters below.
    pub fn new(idx: usize, element: &str, position: Point3<f64>) -> Self {
        Self {
            idx,
            orig_idx: idx,
            element: element.to_string(),
            atom_type: element.to_string(),
            position,
            residue: None,
            is_sidechain: false,
        }
    }

    pub fn with_orig_idx(mut self, orig_idx: usize) -> Self {
        self.orig_idx = orig_idx;
        self
    }

    pub fn with_type(mut self, atom_type: &str) -> Self {
        self.atom_type = atom_type.to_string();
        self
    }

    pub fn with_residue(mut self, residue: ResidueInfo) -> Self {
        self.residue = Some(residue);
        self
    }

    pub fn with_sidechain(mut self, is_sidechain: bool) -> Self {
        self.is_sidechain = is_sidechain;
        self
    }

    pub fn residue_name(&self) -> Option<&str> {
        self.residue.as_ref().map(|r| r.name.as_str())
    }

    pub fn residue_number(&self) -> Option<isize> {
        self.residue.as_ref().map(|r| r.number)
    }

    pub fn chain(&self) -> Option<char> {
        self.residue.as_ref().map(|r| r.chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(12, "C", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.idx, 12);
        assert_eq!(atom.orig_idx, 12);
        assert_eq!(atom.element, "C");
        assert_eq!(atom.atom_type, "C");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.residue.is_none());
        assert!(!atom.is_sidechain);
    }

    #[test]
    fn residue_accessors_return_none_without_metadata() {
        let atom = Atom::new(0, "O", Point3::origin());
        assert_eq!(atom.residue_name(), None);
        assert_eq!(atom.residue_number(), None);
        assert_eq!(atom.chain(), None);
    }

    #[test]
    fn builder_setters_fill_in_metadata() {
        let atom = Atom::new(3, "N", Point3::origin())
            .with_orig_idx(1042)
            .with_type("N.4")
            .with_residue(ResidueInfo::new("LYS", 57, 'B'))
            .with_sidechain(true);
        assert_eq!(atom.orig_idx, 1042);
        assert_eq!(atom.atom_type, "N.4");
        assert_eq!(atom.residue_name(), Some("LYS"));
        assert_eq!(atom.residue_number(), Some(57));
        assert_eq!(atom.chain(), Some('B'));
        assert!(atom.is_sidechain);
    }

    #[test]
    fn residue_info_displays_name_number_chain() {
        assert_eq!(ResidueInfo::new("ASP", 102, 'A').to_string(), "ASP102A");
    }
}
