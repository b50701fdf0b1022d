use crate::aabb::AABB;
use crate::math::Ray;
use crate::prelude::Ordering;

use rand::{Rng, SeedableRng};
use rand_mt::Mt64;

const MAX_IN_LEAF: usize = 5;

// axis choice during the build is randomized but repeatable
const BUILD_SEED: u64 = 0x5eed_b0b0_cafe_f00d;

#[derive(Copy, Clone, Debug)]
enum BvhNode {
    Leaf {
        bounds: AABB,
        start: u32,
        count: u32,
    },
    Interior {
        bounds: AABB,
        // the left child is always the next node in the arena
        right: u32,
    },
}

/// Bounding volume hierarchy over anything that can report world bounds up
/// front. Built once; traversal resolves leaf items through a caller
/// supplied intersect callback, so the same structure serves both the
/// scene's primitive list and a mesh's triangle list.
#[derive(Clone, Debug)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    items: Vec<u32>,
}

impl Bvh {
    pub fn build(bounds: &[AABB]) -> Bvh {
        let mut items: Vec<u32> = (0..bounds.len() as u32).collect();
        let mut nodes = Vec::with_capacity(2 * bounds.len());
        if !items.is_empty() {
            let mut rng = Mt64::seed_from_u64(BUILD_SEED);
            build_node(bounds, &mut items, 0, bounds.len(), &mut nodes, &mut rng);
        }
        Bvh { nodes, items }
    }

    /// Tests the ray against the tree, invoking `hit_item` for every item
    /// in every leaf whose bounds pass the slab test. The callback narrows
    /// `ray.tmax` on a hit, which prunes the rest of the traversal.
    pub fn intersect<F>(&self, ray: &mut Ray, mut hit_item: F) -> bool
    where
        F: FnMut(usize, &mut Ray) -> bool,
    {
        if self.nodes.is_empty() {
            return false;
        }
        self.intersect_node(0, ray, &mut hit_item)
    }

    fn intersect_node<F>(&self, node: usize, ray: &mut Ray, hit_item: &mut F) -> bool
    where
        F: FnMut(usize, &mut Ray) -> bool,
    {
        match self.nodes[node] {
            BvhNode::Leaf {
                ref bounds,
                start,
                count,
            } => {
                if !bounds.hit(ray) {
                    return false;
                }
                let mut any_hit = false;
                for &item in &self.items[start as usize..(start + count) as usize] {
                    any_hit |= hit_item(item as usize, ray);
                }
                any_hit
            }
            BvhNode::Interior { ref bounds, right } => {
                if !bounds.hit(ray) {
                    return false;
                }
                let hit_left = self.intersect_node(node + 1, ray, hit_item);
                let hit_right = self.intersect_node(right as usize, ray, hit_item);
                hit_left || hit_right
            }
        }
    }
}

fn build_node(
    bounds: &[AABB],
    items: &mut Vec<u32>,
    start: usize,
    end: usize,
    nodes: &mut Vec<BvhNode>,
    rng: &mut Mt64,
) -> usize {
    let mut node_bounds = AABB::empty();
    for &item in &items[start..end] {
        node_bounds.expand_mut(&bounds[item as usize]);
    }

    let node_index = nodes.len();
    if end - start <= MAX_IN_LEAF {
        nodes.push(BvhNode::Leaf {
            bounds: node_bounds,
            start: start as u32,
            count: (end - start) as u32,
        });
        return node_index;
    }

    let axis = rng.gen_range(0..3usize);
    items[start..end].sort_by(|&a, &b| {
        let a_min = bounds[a as usize].min[axis];
        let b_min = bounds[b as usize].min[axis];
        a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
    });

    let mid = start + (end - start) / 2;
    nodes.push(BvhNode::Interior {
        bounds: node_bounds,
        right: 0,
    });
    build_node(bounds, items, start, mid, nodes, rng);
    let right_index = build_node(bounds, items, mid, end, nodes, rng);
    if let BvhNode::Interior { right, .. } = &mut nodes[node_index] {
        *right = right_index as u32;
    }
    node_index
}
