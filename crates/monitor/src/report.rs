use std::collections::HashMap;

use tracing::info;

use interface::PriceSnapshot;

/// 심볼 하나의 요약: 최신 가격과 직전 관측 대비 변화율(%)
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSummary {
    pub symbol: String,
    pub latest: f64,
    pub change_pct: Option<f64>,
}

/// 히스토리를 심볼별로 묶어 요약
///
/// 심볼 순서는 히스토리에 처음 등장한 순서를 따릅니다. 관측이 하나뿐이거나
/// 직전 가격이 0이면 변화율은 없습니다.
pub fn summarize(history: &[PriceSnapshot]) -> Vec<SymbolSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut prices_by_symbol: HashMap<String, Vec<f64>> = HashMap::new();

    for snapshot in history {
        if !prices_by_symbol.contains_key(&snapshot.symbol) {
            order.push(snapshot.symbol.clone());
        }
        prices_by_symbol
            .entry(snapshot.symbol.clone())
            .or_default()
            .push(snapshot.price);
    }

    let mut summaries = Vec::new();
    for symbol in order {
        let prices = match prices_by_symbol.get(&symbol) {
            Some(prices) if !prices.is_empty() => prices,
            _ => continue,
        };

        let latest = prices[prices.len() - 1];
        let change_pct = if prices.len() >= 2 {
            let previous = prices[prices.len() - 2];
            if previous != 0.0 {
                Some((latest - previous) / previous * 100.0)
            } else {
                None
            }
        } else {
            None
        };

        summaries.push(SymbolSummary {
            symbol,
            latest,
            change_pct,
        });
    }

    summaries
}

/// 저장된 히스토리의 최신 가격 테이블 출력
pub fn print_table(history: &[PriceSnapshot]) {
    if history.is_empty() {
        info!("히스토리가 비어 있습니다. 먼저 run 커맨드로 수집을 시작하세요");
        return;
    }

    println!("\nLatest Prices:");
    println!("{}", "-".repeat(40));
    println!("{:<15} {:<12} {}", "Cryptocurrency", "Latest Price", "Change");
    println!("{}", "-".repeat(40));

    for summary in summarize(history) {
        match summary.change_pct {
            Some(change) => println!(
                "{:<15} ${:<11.2} {:+.2}%",
                summary.symbol.to_uppercase(),
                summary.latest,
                change
            ),
            None => println!(
                "{:<15} ${:<11.2} N/A",
                summary.symbol.to_uppercase(),
                summary.latest
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::DateTime;

    fn snapshot(symbol: &str, price: f64, ts: i64) -> PriceSnapshot {
        PriceSnapshot {
            symbol: symbol.to_string(),
            price,
            observed_at: DateTime::from_timestamp(ts, 0).unwrap(),
        }
    }

    #[test]
    fn test_summarize_keeps_first_seen_order() {
        let history = vec![
            snapshot("ethereum", 50.0, 1),
            snapshot("bitcoin", 100.0, 1),
            snapshot("ethereum", 55.0, 2),
            snapshot("bitcoin", 110.0, 2),
        ];

        let summaries = summarize(&history);

        let order: Vec<&str> = summaries.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(order, vec!["ethereum", "bitcoin"]);
    }

    #[test]
    fn test_summarize_change_against_previous_observation() {
        let history = vec![snapshot("bitcoin", 100.0, 1), snapshot("bitcoin", 110.0, 2)];

        let summaries = summarize(&history);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].latest, 110.0);
        let change = summaries[0].change_pct.unwrap();
        assert!((change - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_single_observation_has_no_change() {
        let history = vec![snapshot("bitcoin", 100.0, 1)];

        let summaries = summarize(&history);

        assert_eq!(summaries[0].change_pct, None);
    }

    #[test]
    fn test_summarize_zero_previous_price_has_no_change() {
        let history = vec![snapshot("bitcoin", 0.0, 1), snapshot("bitcoin", 110.0, 2)];

        let summaries = summarize(&history);

        assert_eq!(summaries[0].change_pct, None);
    }

    #[test]
    fn test_summarize_empty_history() {
        assert!(summarize(&[]).is_empty());
    }
}
