/// Monotonic source of content block numbers.
///
/// One counter is owned by each [`Document`](super::Document), so every tree
/// built on the same page draws from the same sequence and block ids never
/// collide. Numbers are only ever handed out in increasing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockCounter {
    next: u64,
}

impl BlockCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A counter whose first number is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn next_number(&mut self) -> u64 {
        let number = self.next;
        self.next += 1;
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_is_monotonic() {
        let mut counter = BlockCounter::new();
        assert_eq!(counter.next_number(), 0);
        assert_eq!(counter.next_number(), 1);
        assert_eq!(counter.next_number(), 2);
    }

    #[test]
    fn test_counter_starting_at() {
        let mut counter = BlockCounter::starting_at(40);
        assert_eq!(counter.next_number(), 40);
        assert_eq!(counter.next_number(), 41);
    }
}
