mod convex_hull;
mod mesh_intersection;
