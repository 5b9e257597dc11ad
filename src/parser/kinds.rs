use crate::model::DeclarationKind;

/// The tree-sitter node kinds the analyzer distinguishes.
///
/// tree-sitter exposes node kinds as strings; everything the analyzer matches
/// on goes through [`SyntaxKind::of`] first so that the matches below stay
/// exhaustive. Kinds the analyzer does not care about map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    ImportStatement,
    ImportClause,
    NamedImports,
    ImportSpecifier,
    NamespaceImport,
    ExportStatement,
    ExportClause,
    ExportSpecifier,
    ClassDeclaration,
    AbstractClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    FunctionDeclaration,
    GeneratorFunctionDeclaration,
    FunctionSignature,
    LexicalDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    MethodDefinition,
    FormalParameters,
    RequiredParameter,
    OptionalParameter,
    RestPattern,
    TypeParameter,
    TypeIdentifier,
    Identifier,
    PropertyIdentifier,
    StringLiteral,
    Star,
    Default,
    Other,
}

impl SyntaxKind {
    pub fn of(kind: &str) -> Self {
        match kind {
            "program" => SyntaxKind::Program,
            "import_statement" => SyntaxKind::ImportStatement,
            "import_clause" => SyntaxKind::ImportClause,
            "named_imports" => SyntaxKind::NamedImports,
            "import_specifier" => SyntaxKind::ImportSpecifier,
            "namespace_import" => SyntaxKind::NamespaceImport,
            "export_statement" => SyntaxKind::ExportStatement,
            "export_clause" => SyntaxKind::ExportClause,
            "export_specifier" => SyntaxKind::ExportSpecifier,
            "class_declaration" => SyntaxKind::ClassDeclaration,
            "abstract_class_declaration" => SyntaxKind::AbstractClassDeclaration,
            "interface_declaration" => SyntaxKind::InterfaceDeclaration,
            "type_alias_declaration" => SyntaxKind::TypeAliasDeclaration,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "function_declaration" => SyntaxKind::FunctionDeclaration,
            "generator_function_declaration" => SyntaxKind::GeneratorFunctionDeclaration,
            "function_signature" => SyntaxKind::FunctionSignature,
            "lexical_declaration" => SyntaxKind::LexicalDeclaration,
            "variable_declaration" => SyntaxKind::VariableDeclaration,
            "variable_declarator" => SyntaxKind::VariableDeclarator,
            "method_definition" => SyntaxKind::MethodDefinition,
            "formal_parameters" => SyntaxKind::FormalParameters,
            "required_parameter" => SyntaxKind::RequiredParameter,
            "optional_parameter" => SyntaxKind::OptionalParameter,
            "rest_pattern" => SyntaxKind::RestPattern,
            "type_parameter" => SyntaxKind::TypeParameter,
            "type_identifier" => SyntaxKind::TypeIdentifier,
            "identifier" => SyntaxKind::Identifier,
            "property_identifier" => SyntaxKind::PropertyIdentifier,
            "string" => SyntaxKind::StringLiteral,
            "*" => SyntaxKind::Star,
            "default" => SyntaxKind::Default,
            _ => SyntaxKind::Other,
        }
    }

    /// Declarations that bind a single name through their `name` field.
    pub fn named_declaration(self) -> Option<DeclarationKind> {
        match self {
            SyntaxKind::ClassDeclaration | SyntaxKind::AbstractClassDeclaration => {
                Some(DeclarationKind::Class)
            }
            SyntaxKind::InterfaceDeclaration => Some(DeclarationKind::Interface),
            SyntaxKind::TypeAliasDeclaration => Some(DeclarationKind::TypeAlias),
            SyntaxKind::EnumDeclaration => Some(DeclarationKind::Enum),
            SyntaxKind::FunctionDeclaration
            | SyntaxKind::GeneratorFunctionDeclaration
            | SyntaxKind::FunctionSignature => Some(DeclarationKind::Function),
            SyntaxKind::Program
            | SyntaxKind::ImportStatement
            | SyntaxKind::ImportClause
            | SyntaxKind::NamedImports
            | SyntaxKind::ImportSpecifier
            | SyntaxKind::NamespaceImport
            | SyntaxKind::ExportStatement
            | SyntaxKind::ExportClause
            | SyntaxKind::ExportSpecifier
            | SyntaxKind::LexicalDeclaration
            | SyntaxKind::VariableDeclaration
            | SyntaxKind::VariableDeclarator
            | SyntaxKind::MethodDefinition
            | SyntaxKind::FormalParameters
            | SyntaxKind::RequiredParameter
            | SyntaxKind::OptionalParameter
            | SyntaxKind::RestPattern
            | SyntaxKind::TypeParameter
            | SyntaxKind::TypeIdentifier
            | SyntaxKind::Identifier
            | SyntaxKind::PropertyIdentifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::Star
            | SyntaxKind::Default
            | SyntaxKind::Other => None,
        }
    }

    /// `const`/`let`/`var` statements, which bind names through declarators.
    pub fn is_variable_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::LexicalDeclaration | SyntaxKind::VariableDeclaration
        )
    }

    /// Whether an `identifier` directly under a node of this kind is a local
    /// binding of the enclosing declaration rather than a reference.
    ///
    /// JavaScript parameter lists hold bare identifiers, TypeScript ones wrap
    /// them in `required_parameter`/`optional_parameter`.
    pub fn binds_child_identifier(self) -> bool {
        match self {
            SyntaxKind::ClassDeclaration
            | SyntaxKind::AbstractClassDeclaration
            | SyntaxKind::MethodDefinition
            | SyntaxKind::PropertyIdentifier
            | SyntaxKind::FormalParameters
            | SyntaxKind::RequiredParameter
            | SyntaxKind::OptionalParameter
            | SyntaxKind::TypeParameter => true,
            SyntaxKind::Program
            | SyntaxKind::ImportStatement
            | SyntaxKind::ImportClause
            | SyntaxKind::NamedImports
            | SyntaxKind::ImportSpecifier
            | SyntaxKind::NamespaceImport
            | SyntaxKind::ExportStatement
            | SyntaxKind::ExportClause
            | SyntaxKind::ExportSpecifier
            | SyntaxKind::InterfaceDeclaration
            | SyntaxKind::TypeAliasDeclaration
            | SyntaxKind::EnumDeclaration
            | SyntaxKind::FunctionDeclaration
            | SyntaxKind::GeneratorFunctionDeclaration
            | SyntaxKind::FunctionSignature
            | SyntaxKind::LexicalDeclaration
            | SyntaxKind::VariableDeclaration
            | SyntaxKind::VariableDeclarator
            | SyntaxKind::RestPattern
            | SyntaxKind::TypeIdentifier
            | SyntaxKind::Identifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::Star
            | SyntaxKind::Default
            | SyntaxKind::Other => false,
        }
    }

    /// Whether an `identifier` under a node of this kind, itself under
    /// `parent`, binds a name. Covers `...rest` parameters, where the
    /// identifier sits in a `rest_pattern` inside the parameter list.
    pub fn binds_identifier_within(self, parent: Option<SyntaxKind>) -> bool {
        if self.binds_child_identifier() {
            return true;
        }
        self == SyntaxKind::RestPattern
            && matches!(
                parent,
                Some(
                    SyntaxKind::FormalParameters
                        | SyntaxKind::RequiredParameter
                        | SyntaxKind::OptionalParameter
                )
            )
    }
}
