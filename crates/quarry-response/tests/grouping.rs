use bson::doc;
use quarry_response::*;

fn decoder() -> ResponseDecoder<BsonDocumentParser> {
    ResponseDecoder::new(BsonDocumentParser)
}

const HEADER: &str = r#"<lst name="responseHeader">
    <int name="status">0</int>
    <int name="QTime">3</int>
</lst>"#;

fn response(body: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><response>{HEADER}{body}</response>"#)
}

fn field_grouping() -> String {
    response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">4</int>
                <int name="ngroups">2</int>
                <arr name="groups">
                    <lst>
                        <str name="groupValue">A</str>
                        <result name="doclist" numFound="3" start="0">
                            <doc><str name="id">1</str></doc>
                            <doc><str name="id">2</str></doc>
                        </result>
                    </lst>
                    <lst>
                        <null name="groupValue"/>
                        <result name="doclist" numFound="1" start="0">
                            <doc><str name="id">4</str></doc>
                        </result>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    )
}

fn query_grouping() -> String {
    response(
        r#"<lst name="grouped">
            <lst name="q1">
                <int name="matches">10</int>
                <result name="doclist" numFound="7" start="0">
                    <doc><str name="id">7</str></doc>
                </result>
            </lst>
        </lst>"#,
    )
}

#[test]
fn field_grouping_by_category() {
    let results = decoder().decode_query(&field_grouping()).unwrap();

    let category = results.grouping.get("category").unwrap();
    assert_eq!(category.matches, 4);
    assert_eq!(category.ngroups, Some(2));
    assert_eq!(category.groups.len(), 2);

    assert_eq!(category.groups[0].group_value, "A");
    assert_eq!(category.groups[0].num_found, 3);
    assert_eq!(
        category.groups[0].documents,
        vec![doc! { "id": "1" }, doc! { "id": "2" }]
    );

    assert_eq!(category.groups[1].group_value, UNMATCHED_GROUP_VALUE);
    assert_eq!(category.groups[1].num_found, 1);
}

#[test]
fn query_grouping_yields_single_group() {
    let results = decoder().decode_query(&query_grouping()).unwrap();

    let q1 = results.grouping.get("q1").unwrap();
    assert_eq!(q1.groups.len(), 1);
    assert_eq!(q1.groups[0].group_value, "q1");
    assert_eq!(q1.groups[0].num_found, 7);
    assert_eq!(q1.groups[0].documents, vec![doc! { "id": "7" }]);
    assert_eq!(q1.matches, 10);
    assert_eq!(q1.ngroups, None);
}

#[test]
fn more_like_this_has_no_grouping() {
    let xml = response(
        r#"<result name="match" numFound="1" start="0">
            <doc><str name="id">seed</str></doc>
        </result>
        <result name="response" numFound="2" start="0">
            <doc><str name="id">a</str></doc>
            <doc><str name="id">b</str></doc>
        </result>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    assert!(results.grouping.is_empty());
    assert_eq!(results.num_found, 2);
}

#[test]
fn grouping_is_skipped_for_more_like_this_variant() {
    // Even a grouped body leaves nothing to populate on the mlt variant.
    let response = decoder()
        .decode(&field_grouping(), ResponseKind::MoreLikeThis)
        .unwrap();
    assert_eq!(response.kind(), ResponseKind::MoreLikeThis);
    assert!(response.into_query().is_none());
}

#[test]
fn non_numeric_found_count_fails() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">4</int>
                <arr name="groups">
                    <lst>
                        <str name="groupValue">A</str>
                        <result name="doclist" numFound="three" start="0"/>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    );

    let err = decoder().decode_query(&xml).unwrap_err();
    assert!(matches!(
        err,
        ResponseError::Structural(StructuralError::InvalidInteger { ref name, ref value })
            if name == "numFound" && value == "three"
    ));
}

#[test]
fn missing_matches_fails() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <arr name="groups"/>
            </lst>
        </lst>"#,
    );

    assert!(matches!(
        decoder().decode_query(&xml),
        Err(ResponseError::Structural(StructuralError::MissingElement { .. }))
    ));
}

#[test]
fn group_without_doclist_fails() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">1</int>
                <arr name="groups">
                    <lst><str name="groupValue">A</str></lst>
                </arr>
            </lst>
        </lst>"#,
    );

    assert!(decoder().decode_query(&xml).is_err());
}

#[test]
fn entries_without_value_marker_are_skipped() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">2</int>
                <int name="ngroups">1</int>
                <arr name="groups">
                    <lst>
                        <result name="doclist" numFound="1" start="0"/>
                    </lst>
                    <lst>
                        <str name="groupValue">B</str>
                        <result name="doclist" numFound="1" start="0"/>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    let category = results.grouping.get("category").unwrap();
    assert_eq!(category.groups.len(), 1);
    assert_eq!(category.groups[0].group_value, "B");
}

#[test]
fn duplicate_group_values_are_preserved() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="brand">
                <int name="matches">2</int>
                <arr name="groups">
                    <lst>
                        <str name="groupValue">acme</str>
                        <result name="doclist" numFound="1" start="0"/>
                    </lst>
                    <lst>
                        <str name="groupValue">acme</str>
                        <result name="doclist" numFound="1" start="0"/>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    let brand = results.grouping.get("brand").unwrap();
    assert_eq!(brand.groups.len(), 2);
    assert!(brand.groups.iter().all(|g| g.group_value == "acme"));
}

#[test]
fn ngroups_absent_when_server_omits_it() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="brand">
                <int name="matches">9</int>
                <arr name="groups">
                    <lst>
                        <int name="groupValue">12</int>
                        <result name="doclist" numFound="3" start="0"/>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    let brand = results.grouping.get("brand").unwrap();
    assert_eq!(brand.matches, 9);
    assert_eq!(brand.ngroups, None);
    assert_eq!(brand.groups.len(), 1);
    assert_eq!(brand.groups[0].group_value, "12");
}

#[test]
fn repeated_clause_name_fails() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="q1">
                <int name="matches">2</int>
                <result name="doclist" numFound="1" start="0"/>
            </lst>
            <lst name="q1">
                <int name="matches">2</int>
                <result name="doclist" numFound="1" start="0"/>
            </lst>
        </lst>"#,
    );

    let err = decoder().decode_query(&xml).unwrap_err();
    assert!(matches!(
        err,
        ResponseError::Structural(StructuralError::DuplicateClause(ref name)) if name == "q1"
    ));
}

#[test]
fn found_count_may_exceed_returned_documents() {
    let results = decoder().decode_query(&query_grouping()).unwrap();
    let group = &results.grouping.get("q1").unwrap().groups[0];
    assert_eq!(group.num_found, 7);
    assert_eq!(group.documents.len(), 1);
}

#[test]
fn mixed_clauses_decode_by_their_own_layout() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">4</int>
                <int name="ngroups">1</int>
                <arr name="groups">
                    <lst>
                        <str name="groupValue">A</str>
                        <result name="doclist" numFound="4" start="0"/>
                    </lst>
                </arr>
            </lst>
            <lst name="price:[0 TO 10]">
                <int name="matches">4</int>
                <result name="doclist" numFound="2" start="0"/>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    assert_eq!(
        results.grouping.names().collect::<Vec<_>>(),
        vec!["category", "price:[0 TO 10]"]
    );

    let category = results.grouping.get("category").unwrap();
    assert_eq!(category.ngroups, Some(1));

    let price = results.grouping.get("price:[0 TO 10]").unwrap();
    assert_eq!(price.ngroups, None);
    assert_eq!(price.groups.len(), 1);
    assert_eq!(price.groups[0].group_value, "price:[0 TO 10]");
    assert_eq!(price.groups[0].num_found, 2);
}

#[test]
fn unrecognized_grouping_is_empty() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <str name="something">else</str>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    assert!(results.grouping.is_empty());
}

#[test]
fn custom_null_value() {
    let decoder = ResponseDecoder::with_grouping(
        BsonDocumentParser,
        GroupingParser::with_null_value("(none)"),
    );
    let results = decoder.decode_query(&field_grouping()).unwrap();
    let category = results.grouping.get("category").unwrap();
    assert_eq!(category.groups[1].group_value, "(none)");
}

#[test]
fn empty_group_value_text_is_kept() {
    let xml = response(
        r#"<lst name="grouped">
            <lst name="category">
                <int name="matches">1</int>
                <arr name="groups">
                    <lst>
                        <str name="groupValue"></str>
                        <result name="doclist" numFound="1" start="0"/>
                    </lst>
                </arr>
            </lst>
        </lst>"#,
    );

    let results = decoder().decode_query(&xml).unwrap();
    assert_eq!(results.grouping.get("category").unwrap().groups[0].group_value, "");
}

#[test]
fn decoding_twice_is_identical() {
    let decoder = decoder();
    let xml = field_grouping();
    assert_eq!(
        decoder.decode_query(&xml).unwrap(),
        decoder.decode_query(&xml).unwrap()
    );
}

#[test]
fn grouping_parser_works_on_a_parsed_document() {
    let xml = query_grouping();
    let doc = roxmltree::Document::parse(&xml).unwrap();

    assert_eq!(
        grouping::detect(doc.root_element()),
        GroupingShape::QueryGrouping
    );
    let grouping = GroupingParser::new()
        .parse_grouping(doc.root_element(), &BsonDocumentParser)
        .unwrap();
    assert_eq!(grouping.len(), 1);
}
