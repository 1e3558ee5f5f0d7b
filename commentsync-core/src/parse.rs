//! Declarative parsing types for the declaration shapes the engine consumes.
//!
//! Only callable declarations are parsed structurally: functions (anywhere),
//! trait method signatures, and type aliases whose target is an `fn` pointer
//! type. Containers (impl blocks, modules, traits) are parsed just deep enough
//! to recurse into them. Everything else streams through as opaque tokens.

use unsynn::*;

/// Parses tokens until `C` is found on the current token tree level.
pub type VerbatimUntil<C> = Many<Cons<Except<C>, AngleTokenTree>>;

keyword! {
    /// The "fn" keyword
    pub KFn = "fn";
    /// The "pub" keyword
    pub KPub = "pub";
    /// The "async" keyword
    pub KAsync = "async";
    /// The "unsafe" keyword
    pub KUnsafe = "unsafe";
    /// The "extern" keyword
    pub KExtern = "extern";
    /// The "const" keyword
    pub KConst = "const";
    /// The "where" keyword
    pub KWhere = "where";
    /// The "impl" keyword
    pub KImpl = "impl";
    /// The "for" keyword
    pub KFor = "for";
    /// The "mod" keyword
    pub KMod = "mod";
    /// The "trait" keyword
    pub KTrait = "trait";
    /// The "self" keyword
    pub KSelf = "self";
    /// The "mut" keyword
    pub KMut = "mut";
    /// The "type" keyword
    pub KType = "type";
}

operator! {
    /// The "=" operator
    pub Eq = "=";
    /// The "&" operator
    pub And = "&";
}

unsynn! {
    /// Parses either a `TokenTree` or `<...>` grouping
    #[derive(Clone)]
    pub struct AngleTokenTree(
        pub Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, TokenTree>,
    );

    /// Complete function signature with body
    #[derive(Clone)]
    pub struct FnSig {
        /// Leading attributes; doc comments are among them (`///` lexes to `#[doc = ...]`)
        pub attributes: Option<Many<Attribute>>,
        /// Optional visibility (pub, pub(crate), etc.)
        pub visibility: Option<Visibility>,
        pub const_kw: Option<KConst>,
        pub async_kw: Option<KAsync>,
        pub unsafe_kw: Option<KUnsafe>,
        pub extern_kw: Option<ExternSpec>,
        pub _fn: KFn,
        /// Function name
        pub name: Ident,
        /// Optional generic parameters (opaque)
        pub generics: Option<Generics>,
        /// Parameters in parentheses
        pub params: ParenthesisGroupContaining<Option<CommaDelimitedVec<FnParam>>>,
        /// Optional return type
        pub return_type: Option<ReturnType>,
        pub where_clause: Option<WhereClauses>,
        pub body: BraceGroup,
    }

    /// Trait method signature, same shape as [`FnSig`] but terminated by `;`
    #[derive(Clone)]
    pub struct TraitMethodSig {
        pub attributes: Option<Many<Attribute>>,
        pub const_kw: Option<KConst>,
        pub async_kw: Option<KAsync>,
        pub unsafe_kw: Option<KUnsafe>,
        pub extern_kw: Option<ExternSpec>,
        pub _fn: KFn,
        pub name: Ident,
        pub generics: Option<Generics>,
        pub params: ParenthesisGroupContaining<Option<CommaDelimitedVec<FnParam>>>,
        pub return_type: Option<ReturnType>,
        pub where_clause: Option<WhereClauses>,
        pub _semi: Semicolon,
    }

    /// (Outer) attribute like #[inline], including lexed doc comments
    #[derive(Clone)]
    pub struct Attribute {
        pub _hash: Pound,
        pub content: BracketGroup,
    }

    /// Inner attribute like #![forbid(unsafe_code)], including lexed `//!` docs
    #[derive(Clone)]
    pub struct InnerAttribute {
        pub _hash: Pound,
        pub _bang: Bang,
        pub content: BracketGroup,
    }

    /// Extern specification with optional ABI
    #[derive(Clone)]
    pub enum ExternSpec {
        /// "extern" with ABI string like extern "C"
        WithAbi(ExternWithAbi),
        /// Just "extern"
        Bare(KExtern),
    }

    /// Extern with ABI string
    #[derive(Clone)]
    pub struct ExternWithAbi {
        pub _extern: KExtern,
        pub abi: LiteralString,
    }

    /// Simple visibility parsing
    #[derive(Clone)]
    pub enum Visibility {
        /// "pub(crate)", "pub(super)", etc.
        Restricted(RestrictedVis),
        /// Just "pub"
        Public(KPub),
    }

    /// Restricted visibility like pub(crate)
    #[derive(Clone)]
    pub struct RestrictedVis {
        pub _pub: KPub,
        pub restriction: ParenthesisGroup,
    }

    /// Generic parameter list, treated as opaque
    #[derive(Clone)]
    pub struct Generics {
        pub _lt: Lt,
        pub content: Many<Cons<Except<Gt>, TokenTree>>,
        pub _gt: Gt,
    }

    /// Return type: -> Type (the type itself is opaque)
    #[derive(Clone)]
    pub struct ReturnType {
        pub _arrow: RArrow,
        pub return_type: VerbatimUntil<Either<BraceGroup, KWhere, Semicolon>>,
    }

    /// Where clauses: where T: Trait, U: Send
    #[derive(Clone)]
    pub struct WhereClauses {
        pub _kw_where: KWhere,
        pub clauses: CommaDelimitedVec<WhereClausePredicate>,
    }

    /// Single where clause predicate: T: Trait
    #[derive(Clone)]
    pub struct WhereClausePredicate {
        pub pred: VerbatimUntil<Colon>,
        pub _colon: Colon,
        pub bounds: VerbatimUntil<Either<Comma, BraceGroup>>,
    }

    /// Top-level item that can appear in a module
    #[derive(Clone)]
    pub enum ModuleItem {
        /// A trait method signature (no body)
        TraitMethod(TraitMethodSig),
        /// A function definition
        Function(FnSig),
        /// An impl block
        ImplBlock(ImplBlockSig),
        /// A module definition
        Module(ModuleSig),
        /// A trait definition
        Trait(TraitSig),
        /// A type alias (callable-type candidate)
        TypeAlias(TypeAliasSig),
        /// Any other item, consumed one token tree at a time
        Other(TokenTree),
    }

    /// impl Type { ... } block
    #[derive(Clone)]
    pub struct ImplBlockSig {
        pub attributes: Option<Many<Attribute>>,
        pub _impl: KImpl,
        pub generics: Option<Generics>,
        /// Type being implemented (opaque)
        pub target_type: Many<Cons<Except<Either<KFor, BraceGroup>>, TokenTree>>,
        /// Optional "for Trait" part
        pub for_trait: Option<Cons<KFor, Many<Cons<Except<BraceGroup>, TokenTree>>>>,
        pub where_clause: Option<WhereClauses>,
        /// Parsed impl block contents
        pub items: BraceGroupContaining<ModuleContent>,
    }

    /// mod name { ... } block
    #[derive(Clone)]
    pub struct ModuleSig {
        pub attributes: Option<Many<Attribute>>,
        pub visibility: Option<Visibility>,
        pub _mod: KMod,
        pub name: Ident,
        pub items: BraceGroupContaining<ModuleContent>,
    }

    /// trait Name { ... } block
    #[derive(Clone)]
    pub struct TraitSig {
        pub attributes: Option<Many<Attribute>>,
        pub visibility: Option<Visibility>,
        pub unsafe_kw: Option<KUnsafe>,
        pub _trait: KTrait,
        pub name: Ident,
        pub generics: Option<Generics>,
        pub bounds: Option<Cons<Colon, Many<Cons<Except<Either<KWhere, BraceGroup>>, TokenTree>>>>,
        pub where_clause: Option<WhereClauses>,
        pub items: BraceGroupContaining<ModuleContent>,
    }

    /// type Alias = Type;
    #[derive(Clone)]
    pub struct TypeAliasSig {
        pub attributes: Option<Many<Attribute>>,
        pub visibility: Option<Visibility>,
        pub _type: KType,
        pub name: Ident,
        pub generics: Option<Generics>,
        pub _eq: Eq,
        /// Target type (everything until semicolon); re-parsed as
        /// [`FnPtrType`] to recognize callable-type declarations
        pub target: VerbatimUntil<Semicolon>,
        pub _semi: Semicolon,
    }

    /// An `fn` pointer type: fn(code: i32, msg: &str) -> bool
    #[derive(Clone)]
    pub struct FnPtrType {
        pub _fn: KFn,
        pub params: ParenthesisGroupContaining<Option<CommaDelimitedVec<FnPtrParam>>>,
        pub return_type: Option<ReturnType>,
    }

    /// One parameter position of an `fn` pointer type
    #[derive(Clone)]
    pub enum FnPtrParam {
        /// name: Type
        Named(NamedParam),
        /// Bare type with no name, e.g. fn(i32)
        Bare(BareParamType),
    }

    /// Bare type token run inside an `fn` pointer parameter list
    #[derive(Clone)]
    pub struct BareParamType {
        pub type_text: VerbatimUntil<Comma>,
    }

    /// A complete module/file content
    #[derive(Clone)]
    pub struct ModuleContent {
        /// Inner attributes at the top of the module (#![...], `//!` docs)
        pub inner_attrs: Option<Many<InnerAttribute>>,
        /// All items in the module
        pub items: Many<ModuleItem>,
    }

    /// Function parameter: name: Type or self variants
    #[derive(Clone)]
    pub enum FnParam {
        /// self parameter
        SelfParam(SelfParam),
        /// Regular parameter: name: Type
        Named(NamedParam),
        /// Pattern parameter: (a, b): (i32, i32)
        Pattern(PatternParam),
    }

    /// self, &self, &mut self, mut self
    #[derive(Clone)]
    pub enum SelfParam {
        /// self
        Value(KSelf),
        /// &self
        Ref(Cons<And, KSelf>),
        /// &mut self
        RefMut(Cons<And, Cons<KMut, KSelf>>),
        /// mut self
        Mut(Cons<KMut, KSelf>),
    }

    /// name: Type parameter
    #[derive(Clone)]
    pub struct NamedParam {
        pub mut_kw: Option<KMut>,
        pub name: Ident,
        pub _colon: Colon,
        /// Parameter type (opaque)
        pub param_type: VerbatimUntil<Comma>,
    }

    /// Tuple-pattern parameter like (a, b): (i32, i32)
    #[derive(Clone)]
    pub struct PatternParam {
        pub mut_kw: Option<KMut>,
        /// The pattern before the colon (opaque)
        pub pattern: ParenthesisGroup,
        pub _colon: Colon,
        pub param_type: VerbatimUntil<Comma>,
    }
}
