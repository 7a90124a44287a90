//! Property-based tests for bounds arithmetic.

use pvi_format::Bounds;

proptest::proptest! {
    /// A valid split keeps the row height and accounts for every pixel.
    #[test]
    fn split_partitions_width(
        x in -1000i32..1000,
        y in -1000i32..1000,
        w in 2i32..2000,
        h in 0i32..500,
        width in 0i32..2000,
        spacing in 0i32..50,
    ) {
        let b = Bounds::new(x, y, w, h);
        proptest::prop_assume!(width + spacing < w);

        let (left, right) = b.split(width, spacing).unwrap();
        assert_eq!(left.w, width);
        assert_eq!(right.w, w - width - spacing);
        assert_eq!(right.x, left.x + width + spacing);
        assert_eq!(left.h, h);
        assert_eq!(right.h, h);
        assert_eq!(right.right(), b.right());
    }

    /// Splitting off at least the whole width always fails.
    #[test]
    fn split_rejects_too_wide(
        w in 0i32..500,
        extra in 0i32..500,
        spacing in 0i32..50,
    ) {
        let b = Bounds::new(0, 0, w, 20);
        let width = (w - spacing).max(0) + extra;
        assert!(b.split(width, spacing).is_err());
    }

    /// square() is the largest square and stays inside the original.
    #[test]
    fn square_is_centred_inside(
        x in -1000i32..1000,
        y in -1000i32..1000,
        w in 0i32..1000,
        h in 0i32..1000,
    ) {
        let b = Bounds::new(x, y, w, h);
        let s = b.square();
        assert_eq!(s.w, w.min(h));
        assert_eq!(s.h, w.min(h));
        assert!(s.x >= b.x && s.right() <= b.right());
        assert!(s.y >= b.y && s.bottom() <= b.bottom());

        let left_gap = s.x - b.x;
        let right_gap = b.right() - s.right();
        assert!((left_gap - right_gap).abs() <= 1);
        let top_gap = s.y - b.y;
        let bottom_gap = b.bottom() - s.bottom();
        assert!((top_gap - bottom_gap).abs() <= 1);
    }
}
