pub struct DefaultsConfig {
    pub enzyme: String,
    pub min_length: usize,
    pub excluded_residues: String,
    pub charge_range: (u8, u8),
    pub use_regex: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            enzyme: "trypsin".to_string(),
            min_length: 6,
            excluded_residues: "X".to_string(),
            charge_range: (2, 5),
            use_regex: false,
        }
    }
}
