//! Pattern tables for glob and extglob matching.

use label_matcher::{glob_match, CompiledGlob, MatcherOptions};

struct Case {
    pattern: &'static str,
    path: &'static str,
    want: bool,
}

const fn case(pattern: &'static str, path: &'static str, want: bool) -> Case {
    Case {
        pattern,
        path,
        want,
    }
}

fn check(cases: &[Case]) {
    let failures: Vec<String> = cases
        .iter()
        .filter(|c| glob_match(c.pattern, c.path) != c.want)
        .map(|c| format!("glob_match({:?}, {:?}) should be {}", c.pattern, c.path, c.want))
        .collect();
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn test_basic_operators() {
    check(&[
        case("!(ab)", "ab", false),
        case("!(ab)", "cd", true),
        case("!(ab|def)", "ab", false),
        case("!(ab|def)", "def", false),
        case("!(ab|def)", "xyz", true),
        case("+(ab|def)", "ab", true),
        case("+(ab|def)", "def", true),
        case("+(ab|def)", "abdef", true),
        case("+(ab|def)", "xyz", false),
        case("@(*.js|*.ts)", "app.js", true),
        case("@(*.js|*.ts)", "types.ts", true),
        case("@(*.js|*.ts)", "main.go", false),
        case("@(*.go|*.mod)", "go.mod", true),
        case("?(test_)*", "main.go", true),
        case("?(test_)*", "test_helper.go", true),
        case("?(docs/)*.md", "docs/test_helper.go", false),
        case("?(docs/)*.md", "docs/readme.md", true),
        case("*(src|lib)", "", true),
        case("*(src|lib)", "srclib", true),
        case("*(src|lib)", "bin", false),
    ]);
}

#[test]
fn test_operators_with_path_suffix() {
    check(&[
        case("!(test)/*", "src/main.go", true),
        case("!(test)/*", "test/main.go", false),
        case("!(test)/*", "src/common/main.go", false),
        case("!(test)/**", "src/main.go", true),
        case("!(test)/**", "test/helper.go", false),
        case("!(test)/**", "main.go", true),
        case("+(src|lib)/**", "src/components/Button.js", true),
        case("+(src|lib)/**", "lib/utils/helper.ts", true),
        case("+(src|lib)/**", "docs/README.md", false),
        case("@(config|docs)/**/*.json", "config/app.json", true),
        case("@(config|docs)/**/*.json", "docs/api/schema.json", true),
        case("@(config|docs)/**/*.json", "src/data.json", false),
    ]);
}

#[test]
fn test_nested_groups() {
    check(&[
        case("!(+(ab|def)*)", "ab", false),
        case("!(+(ab|def)*)", "abab", false),
        case("!(+(ab|def)*)", "def", false),
        case("!(+(ab|def)*)", "defdef", false),
        case("!(+(ab|def)*)", "xyz", true),
        case("!(+(ab|def)*)", "", true),
        case("@(*.@(js|ts))", "app.js", true),
        case("@(*.@(js|ts))", "types.ts", true),
        case("@(*.@(js|ts))", "main.go", false),
        case("@(*.@(js|ts))", "app.jsx", false),
        case("+(src|lib)/@(*.@(js|ts))", "src/app.js", true),
        case("+(src|lib)/@(*.@(js|ts))", "lib/utils.ts", true),
        case("+(src|lib)/@(*.@(js|ts))", "docs/README.md", false),
        case("+(src|lib)/@(*.@(js|ts))", "src/app.go", false),
        case("src/**/@(*.test.@(js|ts))", "src/components/Button.test.js", true),
        case("src/**/@(*.test.@(js|ts))", "src/utils/nested/helper.test.ts", true),
        case("src/**/@(*.test.@(js|ts))", "lib/utils/helper.test.js", false),
        case("src/**/@(*.test.@(js|ts))", "src/components/Button.js", false),
    ]);
}

#[test]
fn test_whole_pattern_negation_crosses_separators() {
    check(&[
        case("!(*.md)", "main.go", true),
        case("!(*.md)", "README.md", false),
        case("!(*.md)", "docs/guide.md", false),
        case("!(test*)", "src/main.go", true),
        case("!(test*)", "test_helper.go", false),
        case("!(*.js|*.ts)", "main.go", true),
        case("!(*.js|*.ts)", "app.js", false),
        case("!(docs/**)", "src/main.go", true),
        case("!(docs/**)", "docs/guide.md", false),
        case("!(**/*_test.go)", "main.go", true),
        case("!(**/*_test.go)", "src/main_test.go", false),
    ]);
}

#[test]
fn test_negation_inside_paths() {
    check(&[
        case("!(test|spec|__tests__)/**", "src/components/Button.js", true),
        case("!(test|spec|__tests__)/**", "lib/utils/helper.ts", true),
        case("!(test|spec|__tests__)/**", "test/unit.js", false),
        case("!(test|spec|__tests__)/**", "spec/helper.rb", false),
        case("!(test|spec|__tests__)/**", "__tests__/component.test.js", false),
        case("!(test|spec)/**", "test/nested/deep_test.go", false),
        case("!(test|spec)/**", "spec/unit/helper_spec.go", false),
        case("**/!(*.test.js)", "src/main.js", true),
        case("**/!(*.test.js)", "lib/utils/helper.js", true),
        case("**/!(*.test.js)", "src/component.test.js", false),
        case("**/!(*.test.js)", "lib/nested/unit.test.js", false),
        case("!(node_modules)/**/*.js", "src/components/Button.js", true),
        case("!(node_modules)/**/*.js", "lib/utils/index.js", true),
        case("!(node_modules)/**/*.js", "node_modules/react/index.js", false),
        case("!(node_modules)/**/*.js", "node_modules/lodash/lib/core.js", false),
        case("!(node_modules)/**/*.@(js|ts)", "src/app.js", true),
        case("!(node_modules)/**/*.@(js|ts)", "node_modules/react/index.js", false),
        case("**/!(test)/**/*.go", "cmd/main/main.go", true),
        case("**/!(test)/**/*.go", "pkg/utils/helper.go", true),
        case("**/!(test)/**/*.go", "cmd/test/test_main.go", false),
        case("**/!(test)/**/*.go", "internal/test/mock.go", false),
    ]);
}

#[test]
fn test_negation_of_everything_and_nothing() {
    check(&[
        case("!(*)/**", "any/file.txt", false),
        case("!(*)/**", "src/main.go", false),
        case("!()/**", "src/main.go", true),
        case("!()/**", "any/file.txt", true),
        case("!()/**", "main.go", true),
        case("!(*)/**", "main.go", false),
        case("docs/**", "docs", true),
    ]);
}

#[test]
fn test_plain_path_globs() {
    check(&[
        case("*.go", "main.go", true),
        case("*.md", "main.go", false),
        case("**/*.md", "docs/guide.md", true),
        case("**/*.go", "src/main.go", true),
        case("docs/*", "docs/readme.md", true),
        case("docs/*", "src/readme.md", false),
        case("docs/*", "docs/sub/readme.md", false),
        case("**", ".github/labeler.yml", true),
        case("*", ".github/labeler.yml", false),
        case("*", "aqua.yml", true),
        case("src/**/test.go", "src/test.go", true),
        case("src/**/test.go", "src/a/b/test.go", true),
        case("src/**/test.go", "src/a/b/test.txt", false),
        case("*.{js,ts}", "app.ts", true),
        case("file[0-9].txt", "file7.txt", true),
        case("file[!0-9].txt", "file7.txt", false),
        case("invalid(pattern", "invalid(pattern", true),
        case("(*.go)", "(main.go)", true),
    ]);
}

#[test]
fn test_extglob_disabled() {
    let options = MatcherOptions { extglob: false };
    let literal = CompiledGlob::compile_with("*.@(js|ts)", &options);
    assert!(!literal.is_match("file.js"));
    assert!(literal.is_match("file.@(js|ts)"));
    assert!(CompiledGlob::compile_with("*.js", &options).is_match("file.js"));

    let enabled = CompiledGlob::compile_with("*.@(js|ts)", &MatcherOptions::default());
    assert!(enabled.is_match("file.js"));
}
