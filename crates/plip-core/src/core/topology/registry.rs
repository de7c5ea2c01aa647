use phf::{Set, phf_set};

pub static METAL_IONS: Set<&'static str> = phf_set! {
    "CA", "CO", "MG", "MN", "FE", "CU", "ZN", "FE1", "FE2", "FE3", "FE4",
    "LI", "NA", "K", "RB", "SR", "CS", "BA", "CR", "NI", "RU", "RU1",
    "RH", "RH1", "PD", "AG", "CD", "LA", "W", "W1", "OS", "IR", "PT",
    "PT1", "AU", "HG", "CE", "PR", "SM", "EU", "GD", "TB", "YB", "LU",
    "AL", "GA", "IN", "SB", "TL", "PB",
};

// HET codes that never form a ligand on their own: caps, placeholders and unknowns.
pub static UNSUPPORTED: Set<&'static str> = phf_set! {
    "ACE", "NH2", "UNX", "UNL", "UNK", "DUM", "ASX", "GLX",
};

pub static NUCLEOTIDES: Set<&'static str> = phf_set! {
    "A", "C", "T", "G", "U", "DA", "DC", "DT", "DG", "DU",
};

pub static RNA_RESIDUES: Set<&'static str> = phf_set! { "U", "A", "C", "G" };

pub static DNA_RESIDUES: Set<&'static str> = phf_set! { "DT", "DA", "DC", "DG" };

pub fn is_metal_ion(name: &str) -> bool {
    METAL_IONS.contains(name.trim())
}

pub fn is_nucleotide(name: &str) -> bool {
    NUCLEOTIDES.contains(name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_metal_ion_recognizes_common_ions_and_trims() {
        assert!(is_metal_ion("ZN"));
        assert!(is_metal_ion(" MG "));
        assert!(is_metal_ion("FE2"));
        assert!(!is_metal_ion("HOH"));
        assert!(!is_metal_ion("zn"));
    }

    #[test]
    fn is_nucleotide_covers_rna_and_dna_names() {
        assert!(is_nucleotide("U"));
        assert!(is_nucleotide("DG"));
        assert!(!is_nucleotide("ATP"));
    }
}
