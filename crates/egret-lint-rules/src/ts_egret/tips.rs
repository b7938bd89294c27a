//! Warning-tip table: one fixed message per naming-rule kind.

/// Key of a naming rule, used to look up its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipKey {
    /// Class names.
    Cls,
    /// Module and namespace names.
    Module,
    /// Interface names.
    Interface,
    /// Enum names.
    Enum,
    /// Any `var` statement.
    Var,
    /// Global constants.
    Const,
    /// Global `let` bindings with uppercase letters.
    Let,
    /// Root-level `let` bindings.
    LetG,
    /// Namespace-level `let` bindings.
    LetP,
    /// Static methods.
    MethodS,
    /// Instance methods.
    Method,
    /// Static properties.
    PropertyS,
    /// Static readonly properties.
    PropertySRd,
    /// Public instance properties.
    PropertyM,
    /// Private and protected instance properties.
    PropertyP,
}

impl TipKey {
    /// Every key, in table order.
    pub const ALL: [TipKey; 15] = [
        Self::Cls,
        Self::Module,
        Self::Interface,
        Self::Enum,
        Self::Var,
        Self::Const,
        Self::Let,
        Self::LetG,
        Self::LetP,
        Self::MethodS,
        Self::Method,
        Self::PropertyS,
        Self::PropertySRd,
        Self::PropertyM,
        Self::PropertyP,
    ];

    /// Short key as written in rule documentation (e.g. `let_g`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cls => "cls",
            Self::Module => "module",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Var => "var",
            Self::Const => "const",
            Self::Let => "let",
            Self::LetG => "let_g",
            Self::LetP => "let_p",
            Self::MethodS => "method_s",
            Self::Method => "method",
            Self::PropertyS => "property_s",
            Self::PropertySRd => "property_s_rd",
            Self::PropertyM => "property_m",
            Self::PropertyP => "property_p",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for TipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Immutable mapping from [`TipKey`] to message.
#[derive(Debug)]
pub struct WarnTips {
    messages: [&'static str; 15],
}

impl WarnTips {
    /// Builds a table from messages given in [`TipKey::ALL`] order.
    #[must_use]
    pub const fn new(messages: [&'static str; 15]) -> Self {
        Self { messages }
    }

    /// Message for `key`.
    #[must_use]
    pub const fn get(&self, key: TipKey) -> &'static str {
        self.messages[key.index()]
    }

    /// All entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (TipKey, &'static str)> + '_ {
        TipKey::ALL.iter().map(|key| (*key, self.get(*key)))
    }
}

/// The Egret naming convention.
pub static EGRET_TIPS: WarnTips = WarnTips::new([
    "Class names must be PascalCase, e.g. TextField",
    "Module names must be lower snake_case, e.g. name_space",
    "Interface names must be PascalCase with an I prefix, e.g. IWatch",
    "Enum names must be PascalCase with an E prefix, e.g. EGameType",
    "`var` is banned: declare variables with `let` and constants with `const`",
    "Constant names must be UPPER_SNAKE_CASE with a C_ prefix, e.g. C_GAME_NAME",
    "Global variable names must be lower snake_case with a g_ or p_ prefix, e.g. g_scene_hall, p_res",
    "Root-level variable names must be lower snake_case with a g_ prefix, e.g. g_scene_hall",
    "Module-level variable names must be lower snake_case with a p_ prefix, e.g. p_hall",
    "Static method names must be PascalCase, e.g. CreateIns()",
    "Method names must be camelCase, e.g. toString()",
    "Static property names must be lower snake_case with an s_ prefix, e.g. s_instance",
    "Static readonly property names must be UPPER_SNAKE_CASE, e.g. FAIL_CODE",
    "Public property names must be lower snake_case with an m_ prefix, e.g. m_id",
    "Private property names must be lower snake_case with a _ prefix, e.g. _name",
]);
