use serde::{Deserialize, Serialize};

/// 新编写的一道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    /// 固定四个选项
    pub options: [String; 4],
    pub answer: String,
    pub hint: String,
    #[serde(default)]
    pub elaboration: String,
    #[serde(default)]
    pub reference_link: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub difficulty: String,
}

fn default_kind() -> String {
    "MCQ".to_string()
}

impl QuestionRecord {
    /// 答案是否是四个选项之一
    pub fn answer_in_options(&self) -> bool {
        self.options.iter().any(|option| option == &self.answer)
    }

    /// 按旧表结构生成前 `LEGACY_CELLS` 个单元格
    ///
    /// 视频、图片两列本次迁移不填写，`topic` / `sheet_number` 由整批题目共享
    pub fn legacy_cells(&self, topic: &str, sheet_number: &str) -> Vec<String> {
        let [o1, o2, o3, o4] = &self.options;
        vec![
            self.prompt.clone(),
            o1.clone(),
            o2.clone(),
            o3.clone(),
            o4.clone(),
            self.answer.clone(),
            self.hint.clone(),
            self.elaboration.clone(),
            self.reference_link.clone(),
            String::new(),
            String::new(),
            self.kind.clone(),
            topic.to_string(),
            sheet_number.to_string(),
        ]
    }
}

/// `legacy_cells` 生成的单元格数量
pub const LEGACY_CELLS: usize = 14;

/// 一批待追加的题目（来自 TOML 文件）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBatch {
    /// 知识点，例如 "Fractions"
    pub topic: String,
    /// 练习册编号，TOML 中可写成字符串或整数
    #[serde(deserialize_with = "deserialize_sheet_number")]
    pub sheet_number: String,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionBatch {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

// sheet_number 既可以是字符串也可以是整数
fn deserialize_sheet_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct SheetNumberVisitor;

    impl<'de> Visitor<'de> for SheetNumberVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer worksheet number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(SheetNumberVisitor)
}
