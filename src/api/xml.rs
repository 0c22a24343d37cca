//! XMLツリー
//!
//! quick-xml のイベントを所有型の要素ツリー（`XmlNode`）に組み立てる。
//! 各フィールドの「要素が存在するときだけ値を設定する」規則を
//! `child` / `children` / `path` の検索で表現するためのもの。
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    /// quick-xml が検出した構文エラー
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// 構文上は読めたが文書として成立しない
    #[error("malformed XML: {0}")]
    Structure(String),
}

impl XmlError {
    fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}

/// XML要素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
    text: String,
}

impl XmlNode {
    /// 文書全体を解析してルート要素を返す
    ///
    /// 空文書、閉じられていない要素、複数のルート要素、
    /// ルート外のテキストはすべてエラーになる。
    pub fn parse(input: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(XmlError::structure("content after the root element"));
                    }
                    stack.push(Self::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let node = Self::from_start(&start)?;
                    Self::attach(&mut stack, &mut root, node)?;
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| XmlError::structure("unexpected closing tag"))?;
                    Self::attach(&mut stack, &mut root, node)?;
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    match stack.last_mut() {
                        Some(parent) => parent.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(XmlError::structure("text outside the root element")),
                    }
                }
                Event::CData(data) => {
                    let data = data.into_inner();
                    match stack.last_mut() {
                        Some(parent) => parent.text.push_str(&String::from_utf8_lossy(&data)),
                        None => return Err(XmlError::structure("CDATA outside the root element")),
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(XmlError::structure("unclosed element at end of document"));
        }

        root.ok_or_else(|| XmlError::structure("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attach(
        stack: &mut [XmlNode],
        root: &mut Option<XmlNode>,
        node: XmlNode,
    ) -> Result<(), XmlError> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None if root.is_none() => *root = Some(node),
            None => return Err(XmlError::structure("multiple root elements")),
        }
        Ok(())
    }

    /// 要素名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 要素直下のテキスト（前後の空白を含む）
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 属性値
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 指定名の最初の子要素
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// 指定名の子要素すべて（文書順）
    pub fn children<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// 子要素のテキスト
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(XmlNode::text)
    }

    /// 各段で最初に一致した子要素をたどる
    pub fn path(&self, segments: &[&str]) -> Option<&XmlNode> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// 最後の段だけ一致する要素をすべて返す
    ///
    /// 途中の段は最初に一致した要素をたどる。
    pub fn path_all(&self, segments: &[&str]) -> Vec<&XmlNode> {
        match segments.split_last() {
            Some((last, parents)) => self
                .path(parents)
                .map(|parent| parent.children(last).collect())
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }
}
