use expect_test::{Expect, expect};

use crate::Code;

fn generate(text: &str) -> Code {
    let parse = gbp_parse::parse(text);
    assert!(parse.unterminated.is_empty(), "unexpected open nodes: {:?}", parse.unterminated);
    crate::file(&parse.tree)
}

fn check(text: &str, decl: Expect, impl_: Expect) {
    let code = generate(text);
    decl.assert_eq(&code.decl);
    impl_.assert_eq(&code.impl_);
}

#[test]
fn struct_with_members() {
    check(
        "struct Point {\n    GBP_DECLARE_TYPE(Point, (int)(x), (int)(y))\n};\n",
        expect![[r#"
            struct Point
            {
                // methods
                Point() = default;
                Point(const Point&) = default;
                Point& operator=(const Point&) = default;
                Point(Point&&) = default;

                // members
                int x;
                int y;
                // operators
                template<typename Archive>
                void serialize(Archive& ar) { ar & x & y; }
            #ifdef GBP_DECLARE_TYPE_GEN_ADDITIONALS
                // extra
                using types_as_tuple = std::tuple<int, int>;
                inline bool operator==(const Point& other) const { return x == other.x && y == other.y; }
                inline bool operator!=(const Point& other) const { return !operator==(other); }
                template <int N> typename std::tuple_element<N, types_as_tuple>::type& get_member();
                template <int N> const typename std::tuple_element<N, types_as_tuple>::type& get_member() const;
                template <int N> static const char* member_name();
                template <typename F> void apply(F&& f) {
                    f("x", x);
                    f("y", y);
                }
                template <typename F> void apply(F&& f) const {
                    f("x", x);
                    f("y", y);
                }
                template <typename F> bool compare(const Point& obj, F&& f) const {
                    bool result = false;
                    if (get_member<0>() != obj.get_member<0>()) { f(member_name<0>(), get_member<0>(), obj.get_member<0>()); result = true; }
                    if (get_member<1>() != obj.get_member<1>()) { f(member_name<1>(), get_member<1>(), obj.get_member<1>()); result = true; }
                    return result;
                }
                template <typename F> bool compare(const Point& obj, F&& f) {
                    bool result = false;
                    if (get_member<0>() != obj.get_member<0>()) { f(member_name<0>(), get_member<0>(), obj.get_member<0>()); result = true; }
                    if (get_member<1>() != obj.get_member<1>()) { f(member_name<1>(), get_member<1>(), obj.get_member<1>()); result = true; }
                    return result;
                }
            #endif //GBP_DECLARE_TYPE_GEN_ADDITIONALS
            };
            // related functions
            std::ostream& operator<<(std::ostream& os, const Point& obj);"#]],
        expect![[r#"
            #ifdef GBP_DECLARE_TYPE_GEN_ADDITIONALS
            template <> const char* Point::member_name<0>() { return "x"; }
            template <> const char* Point::member_name<1>() { return "y"; }
            template <>       typename std::tuple_element<0, Point::types_as_tuple>::type& Point::get_member<0>()       { return x; }
            template <> const typename std::tuple_element<0, Point::types_as_tuple>::type& Point::get_member<0>() const { return x; }
            template <>       typename std::tuple_element<1, Point::types_as_tuple>::type& Point::get_member<1>()       { return y; }
            template <> const typename std::tuple_element<1, Point::types_as_tuple>::type& Point::get_member<1>() const { return y; }
            #endif //GBP_DECLARE_TYPE_GEN_ADDITIONALS
            std::ostream& operator<<(std::ostream& os, const Point& obj) {
                os << "{" << "x: " << obj.x << ", " << "y: " << obj.y << "}";
                return os;
            }"#]],
    );
}

#[test]
fn namespaced_struct_with_enum() {
    check(
        "namespace app {\nstruct Shape {\n    GBP_DECLARE_ENUM(Kind, std::uint16_t, (Circle), (Square = 4))\n};\n}\n",
        expect![[r#"
            namespace app
            {
            struct Shape
            {
                // methods
                Shape() = default;
                Shape(const Shape&) = default;
                Shape& operator=(const Shape&) = default;
                Shape(Shape&&) = default;

                // members
                enum class Kind : std::uint16_t
                {
                    Circle,
                    Square = 4
                };
                // related functions
                friend const char* enum_cast(Shape::Kind e, bool is_full_name = false);
                friend std::ostream& operator<<(std::ostream& os, Shape::Kind e);
                // operators
                template<typename Archive>
                void serialize(Archive& ar) { (void)ar; }
            #ifdef GBP_DECLARE_TYPE_GEN_ADDITIONALS
                // extra
                using types_as_tuple = std::tuple<>;
                inline bool operator==(const Shape& other) const { return true; }
                inline bool operator!=(const Shape& other) const { return !operator==(other); }
                template <int N> typename std::tuple_element<N, types_as_tuple>::type& get_member();
                template <int N> const typename std::tuple_element<N, types_as_tuple>::type& get_member() const;
                template <int N> static const char* member_name();
                template <typename F> void apply(F&& f) {
                    (void)f;
                }
                template <typename F> void apply(F&& f) const {
                    (void)f;
                }
                template <typename F> bool compare(const Shape& obj, F&& f) const {
                    bool result = false;
                    return result;
                }
                template <typename F> bool compare(const Shape& obj, F&& f) {
                    bool result = false;
                    return result;
                }
            #endif //GBP_DECLARE_TYPE_GEN_ADDITIONALS
            };
            // related functions
            std::ostream& operator<<(std::ostream& os, const Shape& obj);
            } //namespace app"#]],
        expect![[r#"
            namespace app
            {
            const char* enum_cast(Shape::Kind e, bool is_full_name) {
                switch (e) {
                case Shape::Kind::Circle: return is_full_name ? "app::Shape::Kind::Circle" : "Circle";
                case Shape::Kind::Square: return is_full_name ? "app::Shape::Kind::Square" : "Square";
                }
                return "";
            }
            std::ostream& operator<<(std::ostream& os, Shape::Kind e) {
                os << enum_cast(e);
                return os;
            }
            std::ostream& operator<<(std::ostream& os, const Shape& obj) {
                os << "{" << "" << "}";
                return os;
            }
            } //namespace app"#]],
    );
}

#[test]
fn nested_struct_definitions_are_qualified() {
    let code = generate(
        "struct Outer {\nstruct Inner {\n    GBP_DECLARE_TYPE(Inner, (int)(a))\n};\nGBP_DECLARE_TYPE(Outer, (Inner)(inner))\n};\n",
    );

    assert!(code.decl.contains("Inner inner;"));
    assert!(
        code.decl
            .contains("friend std::ostream& operator<<(std::ostream& os, const Outer::Inner& obj);")
    );
    assert!(
        code.impl_
            .contains("template <> const char* Outer::Inner::member_name<0>() { return \"a\"; }")
    );
    assert!(code.impl_.contains(
        "typename std::tuple_element<0, Outer::Inner::types_as_tuple>::type& Outer::Inner::get_member<0>()"
    ));
    // The outer struct's own specializations come before the nested ones.
    let outer = code.impl_.find("Outer::member_name<0>").unwrap();
    let inner = code.impl_.find("Outer::Inner::member_name<0>").unwrap();
    assert!(outer < inner);
}

#[test]
fn member_values_and_simplified_types() {
    let code = generate(
        "struct Config {\n    GBP_DECLARE_TYPE(Config, (std::vector<int>)(items), (double)(ratio)(= 1.5), (unsigned   long)(flags))\n};\n",
    );

    assert!(code.decl.contains("std::vector<int> items;"));
    assert!(code.decl.contains("double ratio = 1.5;"));
    assert!(code.decl.contains("unsigned long flags;"));
    assert!(
        code.decl
            .contains("using types_as_tuple = std::tuple<std::vector<int>, double, unsigned long>;")
    );
    assert!(code.decl.contains("void serialize(Archive& ar) { ar & items & ratio & flags; }"));
    assert!(
        code.decl
            .contains("return items == other.items && ratio == other.ratio && flags == other.flags;")
    );
}

#[test]
fn member_values_keep_balanced_calls() {
    let code =
        generate("struct T {\n    GBP_DECLARE_TYPE(T, (int)(a)(= std::min(1, 2)))\n};\n");

    assert!(code.decl.contains("int a = std::min(1, 2);"));
}

#[test]
fn simple_enum_cases_use_item_names() {
    let code = generate("struct S {\n    GBP_DECLARE_ENUM_SIMPLE(Mode, (Fast), (Slow, 5))\n};\n");

    // Nested inside the struct body, so the whole block carries one extra
    // level of indentation.
    assert!(code.decl.contains("    enum Mode\n    {\n        Fast,\n        Slow= 5\n    };"));
    assert!(code.decl.contains("friend const char* enum_cast(S::Mode e, bool is_full_name = false);"));
    assert!(code.impl_.contains("case S::Mode::Slow: return is_full_name ? \"S::Mode::Slow\" : \"Slow\";"));
    assert!(!code.impl_.contains("Slow= 5:"));
}

#[test]
fn global_passthrough_skips_comments() {
    let code = generate(
        "#pragma once\ntypedef unsigned char byte_t;\n/* licence */\nstruct P {\n    GBP_DECLARE_TYPE(P, (byte_t)(b))\n};\n",
    );

    assert!(code.decl.starts_with("#pragma once\ntypedef unsigned char byte_t;\nstruct P"));
    assert!(!code.decl.contains("licence"));
}

#[test]
fn comments_still_render_when_asked_directly() {
    let parse = gbp_parse::parse("/* licence */\n");
    let comment = parse.tree.children(parse.tree.root())[0];

    assert_eq!(crate::generate(&parse.tree, comment).decl, "/* licence */");
}

#[test]
fn namespaces_without_declarations_vanish() {
    let code = generate("namespace util {\n/* nothing */\n}\nnamespace app {\ntypedef int id_t;\n}\n");

    assert_eq!(code.decl, "namespace app\n{\ntypedef int id_t;\n} //namespace app");
    assert!(code.impl_.is_empty());
}

#[test]
fn generation_is_deterministic() {
    let text = "namespace app {\nstruct P {\n    GBP_DECLARE_TYPE(P, (int)(x))\n};\n}\n";
    assert_eq!(generate(text), generate(text));
}

#[test]
fn empty_input_generates_nothing() {
    assert!(generate("").is_empty());
    assert!(generate("// just a comment\n").is_empty());
}
