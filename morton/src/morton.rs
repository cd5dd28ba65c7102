// Interleave the bits of two 32 bit coordinates: bit `i` of `y` goes to
// position `2i`, bit `i` of `x` to position `2i + 1`.
pub fn interleave(x: u32, y: u32) -> u64 {
    (spread(x) << 1) | spread(y)
}

pub fn deinterleave(z: u64) -> (u32, u32) {
    (compact(z >> 1), compact(z))
}

#[inline]
fn spread(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    v = (v | (v << 1)) & 0x5555_5555_5555_5555;
    v
}

#[inline]
fn compact(z: u64) -> u32 {
    let mut z = z & 0x5555_5555_5555_5555;
    z = (z | (z >> 1)) & 0x3333_3333_3333_3333;
    z = (z | (z >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    z = (z | (z >> 4)) & 0x00FF_00FF_00FF_00FF;
    z = (z | (z >> 8)) & 0x0000_FFFF_0000_FFFF;
    z = (z | (z >> 16)) & 0x0000_0000_FFFF_FFFF;
    z as u32
}

#[cfg(test)]
fn interleave_bitwise((mut x, mut y): (u32, u32)) -> u64 {
    let mut z = 0;
    let msb_mask = 1_u32 << 31;
    for _ in 0..32 {
        z = (z << 1) | (x & msb_mask != 0) as u64;
        z = (z << 1) | (y & msb_mask != 0) as u64;
        x <<= 1;
        y <<= 1;
    }
    z
}

#[test]
fn test_interleave_matches_bitwise() {
    use rand::prelude::*;
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..10_000 {
        let x: u32 = rng.gen();
        let y: u32 = rng.gen();
        assert_eq!(interleave_bitwise((x, y)), interleave(x, y));
    }
    for &(x, y) in &[(0, 0), (u32::MAX, 0), (0, u32::MAX), (u32::MAX, u32::MAX)] {
        assert_eq!(interleave_bitwise((x, y)), interleave(x, y));
    }
}

#[test]
fn test_interleave_layout() {
    assert_eq!(interleave(0, 1), 0b01);
    assert_eq!(interleave(1, 0), 0b10);
    assert_eq!(interleave(0b10, 0b01), 0b1001);
    assert_eq!(interleave(u32::MAX, 0), 0xAAAA_AAAA_AAAA_AAAA);
    assert_eq!(interleave(0, u32::MAX), 0x5555_5555_5555_5555);
}

#[test]
fn test_deinterleave() {
    for x in 0..100 {
        for y in 0..100 {
            assert_eq!((x, y), deinterleave(interleave(x, y)));
        }
    }
    assert_eq!((u32::MAX, u32::MAX), deinterleave(u64::MAX));
}
