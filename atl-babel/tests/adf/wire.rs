//! Wire format snapshots

use atl_babel::markdown_to_adf;
use insta::assert_snapshot;

#[test]
fn test_heading_and_marked_paragraph() {
    let doc = markdown_to_adf("# Title\n\nSome **bold** text").unwrap();
    assert_snapshot!(serde_json::to_string_pretty(&doc).unwrap(), @r###"
    {
      "type": "doc",
      "version": 1,
      "content": [
        {
          "type": "heading",
          "attrs": {
            "level": 1
          },
          "content": [
            {
              "type": "text",
              "text": "Title"
            }
          ]
        },
        {
          "type": "paragraph",
          "content": [
            {
              "type": "text",
              "text": "Some "
            },
            {
              "type": "text",
              "text": "bold",
              "marks": [
                {
                  "type": "strong"
                }
              ]
            },
            {
              "type": "text",
              "text": " text"
            }
          ]
        }
      ]
    }
    "###);
}

#[test]
fn test_bold_italic_marks_order() {
    let doc = markdown_to_adf("***both***").unwrap();
    assert_snapshot!(serde_json::to_string(&doc).unwrap(), @r###"{"type":"doc","version":1,"content":[{"type":"paragraph","content":[{"type":"text","text":"both","marks":[{"type":"strong"},{"type":"em"}]}]}]}"###);
}
