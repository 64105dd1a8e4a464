//! 最小的 XML 标签构造

use std::fmt;

/// 转义 XML 特殊字符
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// XML 标签
///
/// 属性按添加顺序输出，属性值总是转义。内部文本默认转义，
/// 已经是标记的内容（例如嵌套的子标签）需设置 `inner_text_escaped`。
#[derive(Debug, Clone, Default)]
pub struct XmlTag {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub inner_text: Option<String>,
    pub inner_text_escaped: bool,
}

impl XmlTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.attrs.push((name.into(), value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.inner_text = Some(text.into());
        self
    }
}

impl fmt::Display for XmlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }

        match self.inner_text.as_deref() {
            Some(text) if !text.is_empty() => {
                f.write_str(">")?;
                if self.inner_text_escaped {
                    f.write_str(text)?;
                } else {
                    f.write_str(&escape(text))?;
                }
                write!(f, "</{}>", self.name)
            }
            _ => f.write_str("/>"),
        }
    }
}
