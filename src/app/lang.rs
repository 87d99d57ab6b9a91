//! UI label catalog — English and Traditional Chinese.

/// Display language for fixed UI labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    En,
    Tc,
}

impl Language {
    /// The label table for this language.
    pub fn text(self) -> &'static UiText {
        match self {
            Language::En => &EN,
            Language::Tc => &TC,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Tc => "繁中",
        }
    }
}

/// Every fixed label the UI renders.
pub struct UiText {
    pub title: &'static str,
    pub generating: &'static str,
    pub tab_summary: &'static str,
    pub tab_guidance: &'static str,
    pub tab_notes: &'static str,
    pub tab_config: &'static str,
    pub jackpot: &'static str,
    pub generate: &'static str,
    pub synthesize: &'static str,
    pub magic: &'static str,
}

pub static EN: UiText = UiText {
    title: "FDA 510(k) Agentic AI",
    generating: "Agent working...",
    tab_summary: "510(k) Summary",
    tab_guidance: "Guidance Synthesis",
    tab_notes: "Note Keeper",
    tab_config: "Agent Config",
    jackpot: "Spin Style",
    generate: "Generate Report",
    synthesize: "Synthesize Guidance",
    magic: "Apply Magic",
};

pub static TC: UiText = UiText {
    title: "FDA 510(k) 智能審查系統",
    generating: "代理正在運行...",
    tab_summary: "510(k) 摘要",
    tab_guidance: "指南綜合",
    tab_notes: "筆記助手",
    tab_config: "代理配置",
    jackpot: "旋轉風格",
    generate: "生成報告",
    synthesize: "綜合指南",
    magic: "施展魔法",
};
