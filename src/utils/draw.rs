use rand::Rng;

/// 手续费比例：奖池的 10%（奶粉钱）
pub const FEE_RATE: f64 = 0.10;

/// 在 [0, len) 上等概率抽取一个下标
pub fn draw_index<R: Rng>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}

/// 奖金拆分：手续费四舍五入，奖金取余数，两者之和恒等于奖池
pub fn prize_split(total_pool: i64) -> (i64, i64) {
    let fee = (total_pool as f64 * FEE_RATE).round() as i64;
    let winner_prize = total_pool - fee;
    (fee, winner_prize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_split_basic() {
        let (fee, prize) = prize_split(1000);
        assert_eq!(fee, 100);
        assert_eq!(prize, 900);
    }

    #[test]
    fn test_prize_split_sums_to_pool() {
        for pool in [0i64, 1, 199, 200, 250, 999, 1000, 123_456] {
            let (fee, prize) = prize_split(pool);
            assert_eq!(fee + prize, pool, "pool = {pool}");
            assert!(fee >= 0);
            assert!(prize >= 0);
        }
    }

    #[test]
    fn test_prize_split_rounds_half_up() {
        // 250 * 0.10 = 25，205 * 0.10 = 20.5 -> 21
        assert_eq!(prize_split(250).0, 25);
        assert_eq!(prize_split(205).0, 21);
    }

    #[test]
    fn test_draw_index_is_uniform() {
        let mut rng = rand::thread_rng();
        let mut counts = [0usize; 3];
        let n = 10_000;
        for _ in 0..n {
            counts[draw_index(&mut rng, 3)] += 1;
        }
        // 期望每个约 3333 次，容忍 ±6 个标准差左右的偏差
        for (i, &c) in counts.iter().enumerate() {
            assert!(
                (c as i64 - 3333).abs() < 300,
                "index {i} drawn {c} times out of {n}"
            );
        }
    }

    #[test]
    fn test_draw_index_single_entry() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert_eq!(draw_index(&mut rng, 1), 0);
        }
    }
}
