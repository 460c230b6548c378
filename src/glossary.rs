//! The topic store: an ordered, immutable set of glossary entries.
//!
//! A [`Glossary`] is built once at startup, either from the built-in data
//! set or from a JSON file, and is only ever read afterwards. Topics keep
//! their declaration order, so "first match" lookups are deterministic.

use crate::matcher::Pattern;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A named glossary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub body: String,
}

impl Topic {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// On-disk glossary file format.
#[derive(Debug, Deserialize)]
struct GlossaryFile {
    topics: Vec<Topic>,
}

const BUILTIN_TOPICS: &[(&str, &str)] = &[
    (
        "Закон Хика",
        "Закон Хика описывает время, необходимое для принятия решения, как логарифм от количества альтернатив. Подробнее: https://ru.wikipedia.org/wiki/Закон_Хика",
    ),
    (
        "Меню в интерфейсах",
        "Меню представляют собой иерархию пунктов, позволяющих пользователю выбирать команды.",
    ),
    (
        "Эвристики Юзабилити",
        "Набор принципов для оценки удобства интерфейса, например, рекомендации Нильсена. Ссылка: https://www.nngroup.com/articles/ten-usability-heuristics/",
    ),
    (
        "Горячие клавиши",
        "Сочетания клавиш, ускоряющие выполнение команд без использования мыши.",
    ),
    (
        "Графические интерфейсы",
        "GUI позволяет взаимодействовать с программами через визуальные элементы.",
    ),
    (
        "Логика поиска по шаблону",
        "Поиск осуществляется точным совпадением слова в тексте.",
    ),
    (
        "Посимвольный поиск",
        "По мере ввода текста список подходящих результатов обновляется.",
    ),
    (
        "Пользовательские сценарии",
        "Use-case описывает действия пользователя для достижения цели.",
    ),
    (
        "Метрики оценки интерфейса",
        "Показатели, такие как точность, скорость и удовлетворенность пользователя.",
    ),
];

/// Ordered collection of topics, unique by title.
#[derive(Debug, Clone)]
pub struct Glossary {
    topics: Vec<Topic>,
}

impl Glossary {
    /// Build a glossary, rejecting empty or duplicate titles.
    pub fn new(topics: Vec<Topic>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if topic.title.trim().is_empty() {
                bail!("Topic with empty title");
            }
            if !seen.insert(topic.title.as_str()) {
                bail!("Duplicate topic title: {}", topic.title);
            }
        }
        Ok(Self { topics })
    }

    /// The usability glossary shipped with the application.
    pub fn builtin() -> Self {
        Self {
            topics: BUILTIN_TOPICS
                .iter()
                .map(|(title, body)| Topic::new(*title, *body))
                .collect(),
        }
    }

    /// Load topics from a JSON file of the form
    /// `{"topics": [{"title": "...", "body": "..."}]}`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read glossary file {}", path.display()))?;
        let file: GlossaryFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse glossary file {}", path.display()))?;
        Self::new(file.topics)
            .with_context(|| format!("Invalid glossary file {}", path.display()))
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    /// Exact lookup of a body by title.
    pub fn lookup(&self, title: &str) -> Option<&str> {
        self.topics
            .iter()
            .find(|t| t.title == title)
            .map(|t| t.body.as_str())
    }

    /// Topics whose title or body contains `query`, ignoring case.
    pub fn filter(&self, query: &str) -> Vec<&Topic> {
        let pattern = Pattern::new(query);
        self.topics
            .iter()
            .filter(|t| pattern.is_match(&t.title) || pattern.is_match(&t.body))
            .collect()
    }

    /// First topic, in declaration order, whose body contains `phrase`,
    /// ignoring case.
    pub fn find_phrase(&self, phrase: &str) -> Option<&Topic> {
        let pattern = Pattern::new(phrase);
        self.topics.iter().find(|t| pattern.is_match(&t.body))
    }
}

impl Default for Glossary {
    fn default() -> Self {
        Self::builtin()
    }
}
