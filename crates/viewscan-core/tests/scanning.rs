use pretty_assertions::assert_eq;
use viewscan_core::{list_triggers, list_triggers_into, ArgValue, ListError, ResultMap, Snapshot};

// ---------------------------------------------------------------------------
// Helper: build a snapshot from (model, module, name, type, arch) rows
// ---------------------------------------------------------------------------
fn snapshot(json: &str) -> Snapshot {
    Snapshot::from_json(json).expect("valid snapshot")
}

fn strs(values: &[&str]) -> Vec<ArgValue> {
    values.iter().map(|v| ArgValue::Str((*v).into())).collect()
}

const SALE: &str = r#"{
  "models": {
    "sale.order": [
      {
        "module": "sale", "name": "view_order_form", "type": "form",
        "arch": "<form><field name=\"partner_id\" on_change=\"onchange_partner(False, uid, partner_id)\"/><field name=\"order_line\"/></form>",
        "fields": {
          "partner_id": {"type": "many2one", "relation": "res.partner"},
          "order_line": {
            "type": "one2many",
            "relation": "sale.order.line",
            "views": {
              "form": {
                "arch": "<form><field name=\"product_id\" on_change=\"product_id_change(parent.pricelist_id, product_id, product_uom_qty, True)\"/></form>",
                "fields": {}
              },
              "tree": {
                "arch": "<tree><field name=\"product_id\" on_change=\"product_id_change(product_id)\"/><field name=\"product_uom_qty\" on_change=\"product_id_change(parent.pricelist_id, product_id, product_uom_qty, True)\"/></tree>",
                "fields": {}
              }
            }
          }
        }
      },
      {
        "module": "sale", "name": "view_order_tree", "type": "tree",
        "arch": "<tree><field name=\"partner_id\" on_change=\"onchange_partner(uid)\"/><field name=\"state\"/></tree>",
        "fields": {}
      }
    ],
    "sale.order.line": [
      {
        "module": "sale", "name": "view_order_line_tree", "type": "tree",
        "arch": "<tree><field name=\"discount\" on_change=\"onchange_discount(discount, None)\"/></tree>"
      }
    ]
  }
}"#;

// ===========================================================================
// Single-model listing
// ===========================================================================

#[test]
fn longest_signature_survives_later_shorter_one() {
    let result = list_triggers(&snapshot(SALE), ["sale.order"]).unwrap();

    let spec = result.get("sale.order", "onchange_partner").unwrap();
    let mut expected = vec![ArgValue::Bool(false)];
    expected.extend(strs(&["uid", "partner_id"]));
    assert_eq!(spec.args, expected);
    assert_eq!(spec.fields.as_slice(), &["partner_id".to_string()]);
    assert_eq!(
        spec.views.as_slice(),
        &[
            "sale.view_order_form".to_string(),
            "sale.view_order_tree".to_string()
        ]
    );
}

#[test]
fn embedded_views_are_attributed_to_related_model() {
    let result = list_triggers(&snapshot(SALE), ["sale.order"]).unwrap();

    let spec = result.get("sale.order.line", "product_id_change").unwrap();
    assert_eq!(spec.args.len(), 4);
    assert_eq!(spec.args[3], ArgValue::Bool(true));
    assert_eq!(
        spec.fields.as_slice(),
        &["product_id".to_string(), "product_uom_qty".to_string()]
    );
    // nested views carry the name of the top-level view embedding them
    assert_eq!(spec.views.as_slice(), &["sale.view_order_form".to_string()]);
    assert!(result.get("sale.order", "product_id_change").is_none());
}

#[test]
fn relation_without_views_is_not_followed() {
    let result = list_triggers(&snapshot(SALE), ["sale.order"]).unwrap();
    assert!(result.model("res.partner").is_none());
    let models: Vec<&str> = result.models().collect();
    assert_eq!(models, vec!["sale.order", "sale.order.line"]);
}

// ===========================================================================
// Nested sub-views
// ===========================================================================

const PICKING: &str = r#"{
  "models": {
    "stock.picking": [
      {
        "module": "stock", "name": "view_picking_form", "type": "form",
        "arch": "<form><field name=\"partner_id\" on_change=\"onchange_partner_in(partner_id)\"/><field name=\"move_lines\"/></form>",
        "fields": {
          "move_lines": {
            "relation": "stock.move",
            "views": {
              "form": {
                "arch": "<form><field name=\"product_id\" on_change=\"onchange_product_id(product_id, location_id)\"/><field name=\"lot_ids\"/></form>",
                "fields": {
                  "lot_ids": {
                    "relation": "stock.production.lot",
                    "views": {
                      "tree": {
                        "arch": "<tree><field name=\"name\" on_change=\"onchange_lot_name(name, None)\"/></tree>",
                        "fields": {}
                      }
                    }
                  }
                }
              }
            }
          }
        }
      }
    ]
  }
}"#;

#[test]
fn second_level_sub_views_switch_model_and_keep_top_view_name() {
    let result = list_triggers(&snapshot(PICKING), ["stock.picking"]).unwrap();

    let models: Vec<&str> = result.models().collect();
    assert_eq!(
        models,
        vec!["stock.move", "stock.picking", "stock.production.lot"]
    );

    let lot = result
        .get("stock.production.lot", "onchange_lot_name")
        .unwrap();
    assert_eq!(
        lot.args,
        vec![ArgValue::Str("name".into()), ArgValue::Null]
    );
    assert_eq!(lot.fields.as_slice(), &["name".to_string()]);
    assert_eq!(lot.views.as_slice(), &["stock.view_picking_form".to_string()]);

    let mv = result.get("stock.move", "onchange_product_id").unwrap();
    assert_eq!(mv.views.as_slice(), &["stock.view_picking_form".to_string()]);
    assert!(result.get("stock.move", "onchange_lot_name").is_none());
    assert_eq!(result.trigger_count(), 3);
}

#[test]
fn tree_only_sub_view_is_scanned() {
    let snap = snapshot(
        r#"{"models": {"account.invoice": [
            {"module": "account", "name": "invoice_form", "type": "form",
             "arch": "<form><field name=\"invoice_line\"/></form>",
             "fields": {
                "invoice_line": {
                    "relation": "account.invoice.line",
                    "views": {
                        "tree": {"arch": "<tree><field name=\"quantity\" on_change=\"onchange_quantity(quantity, price_unit)\"/></tree>"}
                    }
                }
             }}
        ]}}"#,
    );
    let result = list_triggers(&snap, ["account.invoice"]).unwrap();

    let spec = result
        .get("account.invoice.line", "onchange_quantity")
        .unwrap();
    assert_eq!(spec.args, strs(&["quantity", "price_unit"]));
    assert_eq!(spec.fields.as_slice(), &["quantity".to_string()]);
    assert_eq!(spec.views.as_slice(), &["account.invoice_form".to_string()]);
}

// ===========================================================================
// Cross-model aggregation
// ===========================================================================

#[test]
fn related_model_views_merge_with_embedded_ones() {
    let result = list_triggers(&snapshot(SALE), ["sale.order", "sale.order.line"]).unwrap();

    let line = result.model("sale.order.line").unwrap();
    assert_eq!(line.len(), 2);
    let discount = &line["onchange_discount"];
    assert_eq!(
        discount.args,
        vec![ArgValue::Str("discount".into()), ArgValue::Null]
    );
    assert_eq!(
        discount.views.as_slice(),
        &["sale.view_order_line_tree".to_string()]
    );
    assert_eq!(result.trigger_count(), 3);
}

#[test]
fn rescanning_does_not_duplicate_fields_or_views() {
    let snap = snapshot(SALE);
    let once = list_triggers(&snap, ["sale.order"]).unwrap();
    let twice = list_triggers(&snap, ["sale.order", "sale.order"]).unwrap();
    assert_eq!(once, twice);
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn malformed_view_fails_but_keeps_earlier_results() {
    let snap = snapshot(
        r#"{"models": {
            "a.model": [
                {"module": "m", "name": "good", "type": "form",
                 "arch": "<form><field name=\"x\" on_change=\"onchange_x(x)\"/></form>"},
                {"module": "m", "name": "broken", "type": "tree",
                 "arch": "<tree><field name=\"y\" on_change=\"onchange_y(y)\"></tree>"}
            ]
        }}"#,
    );

    let err = list_triggers(&snap, ["a.model"]).unwrap_err();
    assert!(matches!(err, ListError::Scan(_)));
    assert!(err.to_string().contains("m.broken"));

    let mut acc = ResultMap::new();
    assert!(list_triggers_into(&snap, ["a.model"], &mut acc).is_err());
    assert!(acc.get("a.model", "onchange_x").is_some());
    assert!(acc.get("a.model", "onchange_y").is_none());
}

#[test]
fn unknown_model_error_is_passed_through() {
    let err = list_triggers(&snapshot(SALE), ["stock.picking"]).unwrap_err();
    match err {
        ListError::Fetch(viewscan_core::SnapshotError::UnknownModel(model)) => {
            assert_eq!(model, "stock.picking")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparseable_triggers_are_skipped() {
    let snap = snapshot(
        r#"{"models": {"a.model": [
            {"module": "m", "name": "v", "type": "form",
             "arch": "<form><field name=\"x\" on_change=\"not a call\"/><field name=\"y\" on_change=\"f(y) \"/></form>"}
        ]}}"#,
    );
    let result = list_triggers(&snap, ["a.model"]).unwrap();
    assert!(result.model("a.model").unwrap().is_empty());
}
