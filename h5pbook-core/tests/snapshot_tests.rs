//! Snapshot tests for h5pbook-core using insta
//!
//! These capture the serialized shapes the runtime consumes, so any change
//! to field names or defaults shows up as a snapshot diff.

use h5pbook_core::{outline_source, Compiler, Template};
use regex::Regex;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MANIFEST: &str = r#"{
    "title": "Course template",
    "mainLibrary": "H5P.InteractiveBook",
    "preloadedDependencies": [
        {"machineName": "H5P.InteractiveBook", "majorVersion": 1, "minorVersion": 11},
        {"machineName": "H5P.Column", "majorVersion": 1, "minorVersion": 18},
        {"machineName": "H5P.AdvancedText", "majorVersion": 1, "minorVersion": 1},
        {"machineName": "H5P.SingleChoiceSet", "majorVersion": 1, "minorVersion": 11}
    ]
}"#;

fn sample_template() -> Template {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("h5p.json", SimpleFileOptions::default()).unwrap();
    writer.write_all(MANIFEST.as_bytes()).unwrap();
    writer
        .add_directory("H5P.Accordion-1.0/", SimpleFileOptions::default())
        .unwrap();
    Template::from_bytes(writer.finish().unwrap().into_inner()).unwrap()
}

/// Pretty JSON with every UUID replaced by a stable marker
fn stable_json<T: serde::Serialize>(value: &T) -> String {
    let uuid = Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").unwrap();
    let json = serde_json::to_string_pretty(value).unwrap();
    uuid.replace_all(&json, "[uuid]").into_owned()
}

#[test]
fn test_template_report_snapshot() {
    let report = sample_template().report();

    insta::assert_snapshot!(stable_json(&report), @r###"
    {
      "title": "Course template",
      "main_library": "H5P.InteractiveBook",
      "libraries": {
        "entries": {
          "column": "H5P.Column 1.18",
          "text": "H5P.AdvancedText 1.1",
          "accordion": "H5P.Accordion 1.0",
          "single-choice-set": "H5P.SingleChoiceSet 1.11",
          "image": null,
          "video": null,
          "blanks": null,
          "drag-text": null
        },
        "advanced_text": true
      },
      "advanced_text": true,
      "unavailable": [
        "image",
        "video",
        "blanks",
        "drag-text"
      ]
    }
    "###);
}

#[test]
fn test_outline_snapshot() {
    let outline = outline_source(
        "Welcome\n# Basics\nSome text\n![Diagram](d.png)\n[QUIZ]\n? Q\n* Yes\n- No\n[FILL]\nA *b* c\n",
    )
    .unwrap();

    insta::assert_snapshot!(stable_json(&outline), @r###"
    [
      {
        "title": "Introduction",
        "blocks": [
          {
            "kind": "text",
            "lines": 1
          }
        ]
      },
      {
        "title": "Basics",
        "blocks": [
          {
            "kind": "text",
            "lines": 1
          },
          {
            "kind": "image",
            "lines": 1
          },
          {
            "kind": "quiz",
            "lines": 3
          },
          {
            "kind": "fill_blanks",
            "lines": 1
          }
        ]
      }
    ]
    "###);
}

#[test]
fn test_quiz_chapter_snapshot() {
    let compiler = Compiler::new(sample_template());
    let chapters = compiler
        .build_chapters("# A\nHello\n[QUIZ]\n? Q\n* Yes\n- No\n")
        .unwrap();

    insta::assert_snapshot!(stable_json(&chapters[0]), @r###"
    {
      "library": "H5P.Column 1.18",
      "params": {
        "content": [
          {
            "content": {
              "library": "H5P.AdvancedText 1.1",
              "params": {
                "text": "<p>Hello</p>\n"
              },
              "subContentId": "[uuid]",
              "metadata": {
                "license": "U",
                "title": "Text",
                "contentType": "Text"
              }
            },
            "useSeparator": "auto"
          },
          {
            "content": {
              "library": "H5P.SingleChoiceSet 1.11",
              "params": {
                "choices": [
                  {
                    "subContentId": "[uuid]",
                    "question": "Q",
                    "answers": [
                      "Yes",
                      "No"
                    ]
                  }
                ],
                "behaviour": {
                  "autoContinue": true,
                  "timeoutCorrect": 2000,
                  "timeoutWrong": 3000,
                  "soundEffectsEnabled": true,
                  "enableRetry": true,
                  "enableSolutionsButton": true,
                  "passPercentage": 100
                },
                "overallFeedback": [
                  {
                    "from": 0,
                    "to": 100
                  }
                ]
              },
              "subContentId": "[uuid]",
              "metadata": {
                "license": "U",
                "title": "Quiz",
                "contentType": "Single Choice Set"
              }
            },
            "useSeparator": "auto"
          }
        ]
      },
      "subContentId": "[uuid]",
      "metadata": {
        "license": "U",
        "title": "A",
        "contentType": "Column"
      }
    }
    "###);
}
