//! Tests for TreeBuilder

use roxmltree::Document;

use btxml::domain::{
    build_subtree, DomainError, ModelCatalog, ModelCatalogBuilder, NodeModel, NodeType,
    ParamType, TreeBuilder,
};
use btxml::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn first_behavior_tree<'a, 'input>(doc: &'a Document<'input>) -> roxmltree::Node<'a, 'input> {
    doc.root_element()
        .children()
        .find(|n| n.has_tag_name("BehaviorTree"))
        .expect("document has a <BehaviorTree>")
}

#[test]
fn given_minimal_document_when_building_then_matches_expected_model_and_tree() {
    // Arrange
    let xml = r#"<Root><BehaviorTree><Control ID="Seq"><Action name="go" speed="5"/></Control></BehaviorTree></Root>"#;
    let doc = Document::parse(xml).unwrap();

    // Act
    let catalog = ModelCatalogBuilder::new().build(doc.root_element());
    let tree = TreeBuilder::new(&catalog)
        .build(first_behavior_tree(&doc))
        .unwrap();

    // Assert: catalog
    assert_eq!(catalog.len(), 2);
    let seq = catalog.get("Seq").unwrap();
    assert_eq!(seq.node_type, NodeType::Control);
    assert!(seq.parameters.is_empty());
    let action = catalog.get("Action").unwrap();
    assert_eq!(action.node_type, NodeType::Action);
    assert_eq!(action.parameters.len(), 1);
    assert_eq!(action.parameters["speed"], ParamType::Text);

    // Assert: tree
    let root = &tree.root;
    assert_eq!(root.model_id, "Seq");
    assert_eq!(root.instance_name, None);
    assert!(root.parameter_values.is_empty());
    assert_eq!(root.children.len(), 1);

    let child = &root.children[0];
    assert_eq!(child.model_id, "Action");
    assert_eq!(child.instance_name.as_deref(), Some("go"));
    assert_eq!(child.parameter_values.len(), 1);
    assert_eq!(child.parameter_values["speed"], "5");
    assert!(child.is_leaf());
}

#[test]
fn given_resolvable_document_when_building_then_node_count_equals_element_count() {
    // Arrange
    let xml = r#"<Root><BehaviorTree>
        <Sequence>
            <Fallback>
                <IsDoorOpen/>
                <OpenDoor/>
            </Fallback>
            <PassThrough/>
            <Sequence><CloseDoor/><Lock/></Sequence>
        </Sequence>
    </BehaviorTree></Root>"#;
    let doc = Document::parse(xml).unwrap();
    let bt = first_behavior_tree(&doc);
    let element_count = bt.descendants().filter(|n| n.is_element()).count() - 1;

    // Act
    let catalog = ModelCatalogBuilder::new().build(doc.root_element());
    let tree = TreeBuilder::new(&catalog).build(bt).unwrap();

    // Assert
    assert_eq!(tree.root.node_count(), element_count);
    let order: Vec<_> = tree.root.iter().map(|n| n.model_id.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Sequence",
            "Fallback",
            "IsDoorOpen",
            "OpenDoor",
            "PassThrough",
            "Sequence",
            "CloseDoor",
            "Lock"
        ]
    );
    assert_eq!(tree.root.depth(), 3);
}

#[test]
fn given_values_not_matching_declared_types_when_building_then_kept_as_raw_strings() {
    let xml = r#"<Root>
        <TreeNodesModel><Action ID="Wait"><Parameter label="msec" type="Int"/></Action></TreeNodesModel>
        <BehaviorTree><Action ID="Wait" msec="soon" extra="x"/></BehaviorTree>
    </Root>"#;
    let doc = Document::parse(xml).unwrap();
    let catalog = ModelCatalogBuilder::new().build(doc.root_element());

    let tree = TreeBuilder::new(&catalog)
        .build(first_behavior_tree(&doc))
        .unwrap();

    assert_eq!(tree.root.parameter_values["msec"], "soon");
    assert_eq!(tree.root.parameter_values["extra"], "x");
}

#[test]
fn given_misnamed_tree_element_when_building_then_structural_error() {
    // Arrange
    let doc = Document::parse("<Tree><Action/></Tree>").unwrap();
    let mut catalog = ModelCatalog::new();
    catalog.register(NodeModel::new("Action", NodeType::Action));

    // Act
    let result = TreeBuilder::new(&catalog).build(doc.root_element());

    // Assert
    match result {
        Err(DomainError::Structural { message }) => {
            assert!(message.contains("<BehaviorTree>"), "got: {}", message)
        }
        other => panic!("expected structural error, got {:?}", other),
    }
}

#[test]
fn given_missing_catalog_entry_when_building_then_unresolved_model_error() {
    // Arrange: catalog built from another document does not know "Jump"
    let catalog_xml = "<Root><BehaviorTree><Seq><Run/></Seq></BehaviorTree></Root>";
    let catalog_doc = Document::parse(catalog_xml).unwrap();
    let catalog = ModelCatalogBuilder::new().build(catalog_doc.root_element());
    let xml = r#"<BehaviorTree><Seq><Run/><Action ID="Jump"/></Seq></BehaviorTree>"#;
    let doc = Document::parse(xml).unwrap();

    // Act
    let err = TreeBuilder::new(&catalog).build(doc.root_element()).unwrap_err();

    // Assert
    assert_eq!(
        err,
        DomainError::UnresolvedModel {
            tag: "Action".to_string(),
            id: "Jump".to_string(),
        }
    );
}

#[test]
fn given_subtree_element_when_building_directly_then_returns_node() {
    let mut catalog = ModelCatalog::new();
    catalog.register(
        NodeModel::new("Say", NodeType::Action).with_parameter("text", ParamType::Text),
    );
    let doc = Document::parse(r#"<Action ID="Say" name="hello" text="hi there"/>"#).unwrap();

    let node = build_subtree(doc.root_element(), &catalog).unwrap();

    assert_eq!(node.model_id, "Say");
    assert_eq!(node.display_name(), "hello");
    assert_eq!(node.parameter_values["text"], "hi there");
}
