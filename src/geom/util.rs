/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::sorted_pair;

    #[test]
    fn orders_both_ways() {
        assert_eq!(sorted_pair(3.0, 1.0), (1.0, 3.0));
        assert_eq!(sorted_pair(1.0, 3.0), (1.0, 3.0));
        assert_eq!(sorted_pair(2.0, 2.0), (2.0, 2.0));
    }
}
