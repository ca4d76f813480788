//! ジャーニー定義

/// ジャーニー定義
///
/// 専用コンテナ内で順番に実行されるシェルコマンドの列。
/// 最初に失敗したステップで実行が止まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub name: String,
    pub steps: Vec<String>,
}

impl Journey {
    /// ステップが一つもないジャーニー（何もせず終了する）
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_journey_is_noop() {
        let journey = Journey {
            name: "idle".to_string(),
            steps: vec![],
        };
        assert!(journey.is_noop());

        let journey = Journey {
            name: "ping".to_string(),
            steps: vec!["true".to_string()],
        };
        assert!(!journey.is_noop());
    }
}
