//! Hash-indexed cache of recently emitted raw samples.
//!
//! Entries are written only when a literal is emitted (or consumed, on the
//! decode side), which keeps both sides' tables in lockstep without any
//! table traffic on the wire. Collisions simply overwrite.

/// Recent-sample cache with 2^VALUE_BITS slots. `TAG` occupies the bits
/// above the low `VALUE_BITS` of each 5-bit sub-codeword.
pub struct Table<const TAG: u8, const VALUE_BITS: u32> {
    entries: Vec<u16>,
    hash_bit: u32,
}

impl<const TAG: u8, const VALUE_BITS: u32> Table<TAG, VALUE_BITS> {
    pub const MASK: u8 = (1 << VALUE_BITS) - 1;
    pub const SIZE: usize = 1 << VALUE_BITS;

    /// Slot sentinel. Not a representable downshifted sample, so an empty
    /// slot can never produce a false hit.
    pub const EMPTY: u16 = 0xFFFF;

    pub fn new() -> Self {
        Self::with_hash_bit(1)
    }

    pub fn with_hash_bit(hash_bit: u32) -> Self {
        Self {
            entries: vec![Self::EMPTY; Self::SIZE],
            hash_bit,
        }
    }

    pub const fn matches(sub: u8) -> bool {
        sub & !Self::MASK == TAG
    }

    pub fn hash(&self, sample: u16) -> u8 {
        (sample >> self.hash_bit) as u8 & Self::MASK
    }

    pub fn refer(&self, hash: u8) -> u16 {
        self.entries[usize::from(hash)]
    }

    pub fn insert(&mut self, hash: u8, sample: u16) {
        self.entries[usize::from(hash)] = sample;
    }

    /// Wire form of a cache reference.
    pub const fn code(hash: u8) -> u8 {
        TAG | hash
    }

    /// Hash index carried by a sub-codeword.
    pub const fn index(sub: u8) -> u8 {
        sub & Self::MASK
    }
}

impl<const TAG: u8, const VALUE_BITS: u32> Default for Table<TAG, VALUE_BITS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    type Cache = super::Table<0x08, 3>;

    #[test]
    fn tag_detection() {
        assert!(!Cache::matches(0x00));
        assert!(Cache::matches(0x08));
        assert!(Cache::matches(0x0F));
        assert!(!Cache::matches(0x10));
        assert!(!Cache::matches(0x18));
    }

    #[test]
    fn hash_uses_bits_above_the_dropped_lsb() {
        let table = Cache::new();
        assert_eq!(0x05, table.hash(0x010A));
    }

    #[test]
    fn hash_bit_moves_the_hash_window() {
        // 0x010A is 0b1_0000_1010; bits 2..4 are 0b010.
        let table = Cache::with_hash_bit(2);
        assert_eq!(0x02, table.hash(0x010A));
    }

    #[test]
    fn wire_form_roundtrip() {
        assert_eq!(0x0D, Cache::code(0x05));
        assert_eq!(0x05, Cache::index(0x0D));
    }

    #[test]
    fn insert_then_refer() {
        let mut table = Cache::new();
        let sample = 0x010A;
        let hash = table.hash(sample);

        assert_eq!(Cache::EMPTY, table.refer(hash));
        table.insert(hash, sample);
        assert_eq!(sample, table.refer(hash));
    }

    #[test]
    fn collision_overwrites() {
        let mut table = Cache::new();
        table.insert(3, 0x0006);
        table.insert(3, 0x1006);
        assert_eq!(0x1006, table.refer(3));
    }
}
