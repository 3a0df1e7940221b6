//! Integration tests for workflows, data types and layer metadata.

use serde_json::json;
use test_utils::descriptors;
use test_utils::workflows::{
    internal, ndvi_raster, ports_in_countries, COUNTRIES_DATASET, NDVI_DATASET, PORTS_DATASET,
};
use workbench_common::{
    ErrorKind, LayerMetadata, LayerType, Measurement, OperatorNode, RasterDataType,
    ResultDescriptorDict, ResultType, SpatialReference, VectorColumnDataType, VectorDataType,
    WorkflowDict, WorkflowType,
};

// ============================================================================
// Workflow wire format tests
// ============================================================================

#[test]
fn test_workflow_roundtrip() {
    for workflow in [ndvi_raster(), ports_in_countries()] {
        let json = workflow.to_json().unwrap();
        assert_eq!(WorkflowDict::from_json(json).unwrap(), workflow);
    }
}

#[test]
fn test_source_wire_shape() {
    let json = ndvi_raster().to_json().unwrap();

    assert_eq!(
        json,
        json!({
            "type": "Raster",
            "operator": {
                "type": "GdalSource",
                "params": {
                    "data": {"type": "internal", "dataset_id": NDVI_DATASET.to_string()}
                }
            }
        })
    );
}

#[test]
fn test_operator_tree_shape() {
    let workflow = ports_in_countries();
    let root = &workflow.operator;

    assert_eq!(workflow.workflow_type, WorkflowType::Vector);
    assert_eq!(root.operator_type(), "PointInPolygonFilter");
    assert_eq!(root.node_count(), 3);
    assert_eq!(root.depth(), 2);
    assert_eq!(
        root.data_ids(),
        vec![&internal(PORTS_DATASET), &internal(COUNTRIES_DATASET)]
    );
}

#[test]
fn test_operator_with_null_params_decodes() {
    let json = json!({
        "type": "Vector",
        "operator": {
            "type": "Reprojection",
            "params": null,
            "vector_sources": [{
                "type": "OgrSource",
                "params": {"data": {"type": "internal", "dataset_id": PORTS_DATASET.to_string()}}
            }]
        }
    });

    let workflow = WorkflowDict::from_json(json).unwrap();
    match &workflow.operator {
        OperatorNode::Operator(op) => {
            assert!(op.params.is_empty());
            assert_eq!(op.vector_sources.len(), 1);
        }
        other => panic!("expected operator node, got {:?}", other),
    }
}

#[test]
fn test_workflow_without_operator_is_malformed() {
    let err = WorkflowDict::from_json(json!({"type": "Raster"})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

// ============================================================================
// Data type tests
// ============================================================================

#[test]
fn test_data_type_codes_are_idempotent() {
    for t in RasterDataType::ALL {
        assert_eq!(RasterDataType::from_code(t.code()).unwrap(), t);
    }
    for t in VectorDataType::ALL {
        assert_eq!(VectorDataType::from_code(t.code()).unwrap(), t);
    }
    for t in VectorColumnDataType::ALL {
        assert_eq!(VectorColumnDataType::from_code(t.code()).unwrap(), t);
    }
}

#[test]
fn test_unknown_data_type_message() {
    let err = RasterDataType::from_code("U128").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert!(err.to_string().contains("Invalid Data Type: U128"));
}

#[test]
fn test_integer_ranges() {
    assert_eq!(RasterDataType::Byte.min(), 0.0);
    assert_eq!(RasterDataType::Byte.max(), 255.0);
    assert_eq!(RasterDataType::Int16.min(), -32768.0);
    assert_eq!(RasterDataType::UInt32.max(), 4_294_967_295.0);
    assert!(RasterDataType::Float64.min() > RasterDataType::Float64.max());
}

#[test]
fn test_no_data_wire_shape() {
    let no_data = RasterDataType::Int16.no_data(-9999.0);
    assert_eq!(serde_json::to_value(no_data).unwrap(), json!({"I16": -9999.0}));
}

// ============================================================================
// Layer metadata tests
// ============================================================================

#[test]
fn test_raster_metadata_from_descriptor() {
    let dict: ResultDescriptorDict = serde_json::from_value(descriptors::raster_json()).unwrap();
    let metadata = LayerMetadata::from_dict(&dict).unwrap();

    assert_eq!(metadata.layer_type(), LayerType::Raster);
    assert_eq!(metadata.result_type(), ResultType::Raster);
    assert_eq!(metadata.spatial_reference(), &SpatialReference::wgs84());
    match &metadata {
        LayerMetadata::Raster(raster) => {
            assert_eq!(raster.data_type, RasterDataType::Byte);
            assert_eq!(raster.measurement, Measurement::continuous("NDVI", None));
        }
        other => panic!("expected raster metadata, got {:?}", other),
    }
    assert_eq!(metadata.to_dict(), dict);
}

#[test]
fn test_vector_metadata_from_descriptor() {
    let dict: ResultDescriptorDict = serde_json::from_value(descriptors::points_json()).unwrap();
    let metadata = LayerMetadata::from_dict(&dict).unwrap();

    assert_eq!(metadata.layer_type(), LayerType::Vector);
    assert_eq!(metadata.result_type(), ResultType::Points);
    match &metadata {
        LayerMetadata::Vector(vector) => {
            assert_eq!(vector.numeric_columns(), vec!["population"]);
            assert_eq!(vector.columns["category"], VectorColumnDataType::Categorical);
        }
        other => panic!("expected vector metadata, got {:?}", other),
    }
    assert_eq!(metadata.to_dict(), dict);
}

#[test]
fn test_metadata_with_unknown_column_type_fails() {
    let dict = ResultDescriptorDict {
        data_type: "MultiPoint".to_string(),
        spatial_reference: "EPSG:4326".to_string(),
        columns: Some([("when".to_string(), "timestamp".to_string())].into()),
        measurement: None,
    };
    assert_eq!(
        LayerMetadata::from_dict(&dict).unwrap_err().kind(),
        ErrorKind::MalformedInput
    );
}
