use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Available,
    Locked,
}

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub xp: u32,
    pub status: TopicStatus,
}

/// Static learning-topics catalogue shown alongside the quiz.
pub fn catalogue() -> Vec<Topic> {
    use TopicStatus::{Available, Locked};

    fn t(id: &'static str, title: &'static str, icon: &'static str, xp: u32, status: TopicStatus) -> Topic {
        Topic {
            id,
            title,
            icon,
            xp,
            status,
        }
    }

    vec![
        t("basics", "Stock Market Basics", "📈", 50, Available),
        t("fundamental", "Fundamental Analysis", "🔍", 75, Available),
        t("technical", "Technical Analysis", "📊", 100, Available),
        t("risk", "Risk Management", "⚠️", 75, Available),
        t("options", "Options & Derivatives", "🎯", 150, Locked),
        t("crypto", "Crypto & Web3", "₿", 200, Locked),
    ]
}
